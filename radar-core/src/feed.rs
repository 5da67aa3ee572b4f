//! Ingestion of polled radar data.
//!
//! The host polls a remote endpoint on a timer and hands every response to an
//! [`ItemFeed`]. A response replaces the current data only if its status is
//! 2xx, it is declared as JSON and its body parses. Anything else is logged and
//! dropped so the radar keeps showing the last good snapshot.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::Diagnostic;
use crate::setup::{Item, items_from_value};

/// Endpoint polled by the original radar page.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/data";
/// Polling period of the original radar page.
pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 2000;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed with HTTP status {0}")]
    Status(u16),
    #[error("expected JSON, but got content type '{0}'")]
    NotJson(String),
    #[error("response body is not valid JSON: {0}")]
    Body(#[from] serde_json::Error),
}

pub fn is_json_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("application/json")
}

pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Validate one polled response and decode its body.
/// The status is checked before the content type, so an error page that
/// happens to be JSON is still rejected.
pub fn decode_response(status: u16, content_type: &str, body: &str) -> Result<Value, FeedError> {
    if !is_success_status(status) {
        return Err(FeedError::Status(status));
    }
    if !is_json_content_type(content_type) {
        return Err(FeedError::NotJson(content_type.to_string()));
    }
    Ok(serde_json::from_str(body)?)
}

/// Last good snapshot of the radar data.
#[derive(Debug, Clone, Default)]
pub struct ItemFeed {
    data: Value,
    revision: u64,
}

impl ItemFeed {
    pub fn new(initial: Value) -> Self {
        Self { data: initial, revision: 0 }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Bumped every time the data actually changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply a polled response.
    ///
    /// Returns `Ok(true)` if the snapshot changed (the radar must be laid out
    /// again), `Ok(false)` if the response repeated the current data. On error
    /// the snapshot is left untouched.
    pub fn ingest(&mut self, status: u16, content_type: &str, body: &str) -> Result<bool, FeedError> {
        let value = match decode_response(status, content_type, body) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "discarding radar data response");
                return Err(e);
            }
        };
        if value == self.data {
            return Ok(false);
        }
        self.data = value;
        self.revision += 1;
        debug!(revision = self.revision, "radar data updated");
        Ok(true)
    }

    pub fn items(&self, diagnostics: &mut Vec<Diagnostic>) -> Vec<Item> {
        items_from_value(&self.data, diagnostics)
    }
}

/// Apply a polled response to serialized data and return the data to lay out next.
///
/// On a rejected response `current_data` comes back byte for byte, together with
/// the error. Unreadable `current_data` counts as no data yet, so the first good
/// response replaces it.
pub fn ingest_serialized(
    current_data: &str,
    status: u16,
    content_type: &str,
    body: &str,
) -> (String, Option<FeedError>) {
    let current = match serde_json::from_str(current_data) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "current radar data is not JSON, starting from empty");
            Value::Null
        }
    };
    let mut feed = ItemFeed::new(current);
    match feed.ingest(status, content_type, body) {
        Ok(false) => (current_data.to_string(), None),
        Ok(true) => match serde_json::to_string(feed.data()) {
            Ok(json) => (json, None),
            Err(e) => (current_data.to_string(), Some(FeedError::Body(e))),
        },
        Err(e) => (current_data.to_string(), Some(e)),
    }
}
