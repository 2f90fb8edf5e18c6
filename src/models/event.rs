use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::filter::json::{field_array, field_f64, field_i64, field_str};

/// Raw kickoff values above this are epoch milliseconds, otherwise epoch seconds
pub const MILLIS_THRESHOLD: i64 = 9_999_999_999;

/// Fully fetched match detail
#[derive(Debug, Clone)]
pub struct EventDetail {
    pub id: i64,

    /// Match name (e.g., "Arsenal - Chelsea")
    pub name: String,

    /// Kickoff as provided: epoch seconds or milliseconds
    pub kickoff: i64,

    pub markets: Vec<Market>,
}

/// A betting market on an event
#[derive(Debug, Clone)]
pub struct Market {
    pub name: String,
    pub runners: Vec<Runner>,
}

/// One outcome of a market
#[derive(Debug, Clone)]
pub struct Runner {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

impl EventDetail {
    /// Build from an event detail document; markets without runners are kept
    pub fn from_json(node: &Value) -> Self {
        Self {
            id: field_i64(node, "id"),
            name: field_str(node, "name"),
            kickoff: field_i64(node, "kickoff"),
            markets: field_array(node, "markets")
                .iter()
                .map(Market::from_json)
                .collect(),
        }
    }

    pub fn kickoff_at(&self) -> DateTime<Utc> {
        kickoff_instant(self.kickoff)
    }
}

impl Market {
    /// Build from a market node
    pub fn from_json(node: &Value) -> Self {
        Self {
            name: field_str(node, "name"),
            runners: field_array(node, "runners")
                .iter()
                .map(Runner::from_json)
                .collect(),
        }
    }
}

impl Runner {
    /// Build from a runner node; a missing price reads as 0.0
    pub fn from_json(node: &Value) -> Self {
        Self {
            id: field_i64(node, "id"),
            name: field_str(node, "name"),
            price: field_f64(node, "price"),
        }
    }
}

/// Resolve a raw kickoff to an instant. Out-of-range values fall back to the epoch.
pub fn kickoff_instant(raw: i64) -> DateTime<Utc> {
    let instant = if raw > MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(raw)
    } else {
        DateTime::from_timestamp(raw, 0)
    };
    instant.unwrap_or_default()
}
