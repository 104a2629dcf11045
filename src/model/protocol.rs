//! Poll-reply shapes for the device's catalog and action endpoints.
//!
//! The device is lenient about `status` words on the wire: the ready listing
//! may carry `"status":"ok"` or no status field at all, and the overflow item
//! reply is the raw image record itself. Raw DTOs absorb that looseness and
//! are mapped into strict enums here; anything outside the contract becomes a
//! [`ProtocolError`] so callers abort instead of polling forever.

use serde::Deserialize;
use thiserror::Error;

/// One poll of the bulk filename listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingPoll {
    /// Device is still assembling the listing; retry after the poll interval.
    Pending,
    /// Catalog too large for one reply; switch to one-at-a-time discovery.
    Overflow,
    /// The complete catalog, in device order.
    Ready(Vec<String>),
}

/// One poll of the single-image iterator used in overflow mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImagePoll {
    Pending,
    /// Iteration finished; the accumulated names are the catalog.
    Complete,
    /// One catalog entry; poll again immediately for the next.
    Item(String),
}

/// Device reply to an eject or image-load request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionReply {
    Ok,
    /// The device's status word, verbatim.
    Failed(String),
}

impl ActionReply {
    pub fn is_ok(&self) -> bool {
        matches!(self, ActionReply::Ok)
    }
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unexpected status word {0:?}")]
    UnexpectedStatus(String),

    #[error("malformed {what} reply: {source}")]
    Malformed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{what} reply missing {field:?}")]
    MissingField {
        what: &'static str,
        field: &'static str,
    },
}

#[derive(Debug, Deserialize)]
struct RawListing {
    #[serde(default)]
    status: Option<String>,

    #[serde(default)]
    filenames: Option<Vec<String>>,
}

impl ListingPoll {
    pub fn from_wire(value: serde_json::Value) -> Result<Self, ProtocolError> {
        let raw: RawListing = serde_json::from_value(value).map_err(|source| {
            ProtocolError::Malformed {
                what: "filenames",
                source,
            }
        })?;
        match raw.status.as_deref() {
            Some("wait") => Ok(ListingPoll::Pending),
            Some("overflow") => Ok(ListingPoll::Overflow),
            // The firmware omits the status word on the ready path.
            Some("ok") | None => match raw.filenames {
                Some(names) => Ok(ListingPoll::Ready(names)),
                None => Err(ProtocolError::MissingField {
                    what: "filenames",
                    field: "filenames",
                }),
            },
            Some(other) => Err(ProtocolError::UnexpectedStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawImage {
    #[serde(default)]
    status: Option<String>,

    #[serde(default)]
    filename: Option<String>,
}

impl ImagePoll {
    pub fn from_wire(value: serde_json::Value) -> Result<Self, ProtocolError> {
        let raw: RawImage = serde_json::from_value(value).map_err(|source| {
            ProtocolError::Malformed {
                what: "nextImage",
                source,
            }
        })?;
        match raw.status.as_deref() {
            Some("wait") => Ok(ImagePoll::Pending),
            Some("done") => Ok(ImagePoll::Complete),
            // Anything else is the image record itself; it must name a file.
            None => match raw.filename {
                Some(name) => Ok(ImagePoll::Item(name)),
                None => Err(ProtocolError::MissingField {
                    what: "nextImage",
                    field: "filename",
                }),
            },
            Some(other) => match raw.filename {
                Some(name) => Ok(ImagePoll::Item(name)),
                None => Err(ProtocolError::UnexpectedStatus(other.to_string())),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawAction {
    #[serde(default)]
    status: Option<String>,
}

impl ActionReply {
    pub fn from_wire(value: serde_json::Value) -> Result<Self, ProtocolError> {
        let raw: RawAction = serde_json::from_value(value).map_err(|source| {
            ProtocolError::Malformed {
                what: "action",
                source,
            }
        })?;
        match raw.status {
            Some(word) if word == "ok" => Ok(ActionReply::Ok),
            Some(word) => Ok(ActionReply::Failed(word)),
            None => Err(ProtocolError::MissingField {
                what: "action",
                field: "status",
            }),
        }
    }
}

#[cfg(test)]
#[path = "../tests/model/protocol_tests.rs"]
mod tests;
