use super::*;

use crate::model::ProtocolError;

/// Bounded transport retry. A request that keeps failing surfaces its last
/// error instead of stalling the caller; a [`ProtocolError`] is never retried
/// since re-sending the same request reproduces the same malformed reply.
pub(super) fn with_retries<T>(label: &str, mut f: impl FnMut() -> Result<T>) -> Result<T> {
    const ATTEMPTS: usize = 3;
    let mut last: Option<anyhow::Error> = None;
    for i in 0..ATTEMPTS {
        match f() {
            Ok(v) => return Ok(v),
            Err(err) => {
                if err.downcast_ref::<ProtocolError>().is_some() {
                    return Err(err.context(label.to_string()));
                }
                last = Some(err);
                if i + 1 < ATTEMPTS {
                    std::thread::sleep(std::time::Duration::from_millis(200 * (1 << i)));
                }
            }
        }
    }
    Err(last
        .unwrap_or_else(|| anyhow::anyhow!("unknown error"))
        .context(label.to_string()))
}

impl DriveClient {
    pub(super) fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// One GET round trip: fetch, read the JSON body, map it onto the typed
    /// reply. The whole step sits inside the retry loop so transport hiccups
    /// are retried while protocol violations abort immediately.
    pub(super) fn get_mapped<T>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        map: impl Fn(serde_json::Value) -> Result<T>,
    ) -> Result<T> {
        with_retries(endpoint, || {
            let mut request = self.client.get(self.url(endpoint));
            if !query.is_empty() {
                request = request.query(query);
            }
            let value: serde_json::Value = request
                .send()
                .with_context(|| format!("GET {}", endpoint))?
                .error_for_status()
                .with_context(|| format!("{} status", endpoint))?
                .json()
                .with_context(|| format!("parse {} reply", endpoint))?;
            map(value)
        })
    }
}
