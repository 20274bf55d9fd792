//! Loading a trade timeline from its data source.
//!
//! The timeline is loaded once, before any edit. Today the source is a static
//! JSON fixture; a backend client would implement [`TimelineSource`] as well.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use tradeline_events::TimelineEvent;
use tradeline_purchasing::PurchaseOrder;

/// Purchase order plus its flat event collection, as loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimelineData {
    pub purchase_order: Option<PurchaseOrder>,
    pub events: Vec<TimelineEvent>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read timeline fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("timeline fixture is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Provider of the initial timeline dataset.
pub trait TimelineSource {
    fn load_timeline(&self) -> Result<TimelineData, LoadError>;
}

/// Already-materialized data (tests, embedding callers).
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    data: TimelineData,
}

impl StaticSource {
    pub fn new(data: TimelineData) -> Self {
        Self { data }
    }
}

impl TimelineSource for StaticSource {
    fn load_timeline(&self) -> Result<TimelineData, LoadError> {
        Ok(self.data.clone())
    }
}

/// JSON document held in memory (e.g. an `include_str!` fixture).
#[derive(Debug, Clone)]
pub struct JsonStrSource {
    text: String,
}

impl JsonStrSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TimelineSource for JsonStrSource {
    fn load_timeline(&self) -> Result<TimelineData, LoadError> {
        parse_timeline_json(&self.text)
    }
}

/// JSON fixture on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TimelineSource for JsonFileSource {
    fn load_timeline(&self) -> Result<TimelineData, LoadError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_timeline_json(&text)
    }
}

/// Decode a timeline document.
///
/// Accepts `{"trade_timeline": {...}}` or the bare `{purchase_order, events}`
/// object. Only a document that is not JSON at all is an error: a missing or
/// undecodable purchase order becomes `None`, and events that fail to decode
/// are skipped with a warning.
pub fn parse_timeline_json(text: &str) -> Result<TimelineData, LoadError> {
    let document: JsonValue = serde_json::from_str(text)?;
    let root = document.get("trade_timeline").unwrap_or(&document);

    if !root.is_object() {
        if !root.is_null() {
            tracing::warn!("timeline document is not an object; treating it as empty");
        }
        return Ok(TimelineData::default());
    }

    let purchase_order = match root.get("purchase_order") {
        None | Some(JsonValue::Null) => None,
        Some(raw) => match serde_json::from_value::<PurchaseOrder>(raw.clone()) {
            Ok(order) => Some(order),
            Err(err) => {
                tracing::warn!(error = %err, "skipping undecodable purchase order");
                None
            }
        },
    };

    let raw_events: &[JsonValue] = match root.get("events") {
        Some(JsonValue::Array(items)) => items.as_slice(),
        None | Some(JsonValue::Null) => &[],
        Some(_) => {
            tracing::warn!("`events` is not an array; treating it as empty");
            &[]
        }
    };

    let mut events = Vec::with_capacity(raw_events.len());
    for (index, raw) in raw_events.iter().enumerate() {
        match serde_json::from_value::<TimelineEvent>(raw.clone()) {
            Ok(event) => events.push(event),
            Err(err) => {
                let event_id = raw.get("event_id").and_then(JsonValue::as_str).unwrap_or("?");
                tracing::warn!(index, event_id, error = %err, "skipping undecodable timeline event");
            }
        }
    }

    tracing::info!(
        purchase_order = purchase_order.is_some(),
        events = events.len(),
        skipped = raw_events.len() - events.len(),
        "loaded trade timeline"
    );

    Ok(TimelineData {
        purchase_order,
        events,
    })
}
