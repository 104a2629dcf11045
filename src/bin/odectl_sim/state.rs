use std::time::Instant;

use tokio::sync::RwLock;

pub(crate) struct SimOptions {
    pub(crate) catalog: Vec<String>,
    pub(crate) mounted: Option<String>,
    pub(crate) secondary: bool,
    pub(crate) listing_waits: u32,
    pub(crate) overflow: bool,
    pub(crate) item_waits: u32,
    pub(crate) fail_eject: Option<String>,
    pub(crate) fail_load: Option<String>,
}

pub(crate) struct SimState {
    pub(crate) started: Instant,
    pub(crate) catalog: Vec<String>,
    pub(crate) secondary: bool,
    pub(crate) overflow: bool,
    pub(crate) item_waits: u32,
    pub(crate) fail_eject: Option<String>,
    pub(crate) fail_load: Option<String>,
    pub(crate) inner: RwLock<SimInner>,
}

pub(crate) struct SimInner {
    pub(crate) mounted: Option<String>,
    pub(crate) listing_waits_left: u32,
    pub(crate) item_waits_left: u32,
    pub(crate) next_item: usize,
    pub(crate) requests: Vec<RequestRecord>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub(crate) struct RequestRecord {
    pub(crate) endpoint: String,
    pub(crate) at_ms: u64,
}

impl SimState {
    pub(crate) fn new(opts: SimOptions) -> Self {
        Self {
            started: Instant::now(),
            catalog: opts.catalog,
            secondary: opts.secondary,
            overflow: opts.overflow,
            item_waits: opts.item_waits,
            fail_eject: opts.fail_eject,
            fail_load: opts.fail_load,
            inner: RwLock::new(SimInner {
                mounted: opts.mounted,
                listing_waits_left: opts.listing_waits,
                item_waits_left: opts.item_waits,
                next_item: 0,
                requests: Vec::new(),
            }),
        }
    }
}

impl SimInner {
    pub(crate) fn record(&mut self, endpoint: &str, started: Instant) {
        self.requests.push(RequestRecord {
            endpoint: endpoint.to_string(),
            at_ms: started.elapsed().as_millis() as u64,
        });
    }
}
