use serde_json::Value;

use crate::filter::json::{field_array, field_bool, field_i64, field_str};

/// Top-level catalog node
#[derive(Debug, Clone)]
pub struct Sport {
    /// Sport name (e.g., "Football")
    pub name: String,

    /// Regions grouping this sport's leagues
    pub regions: Vec<Region>,
}

/// Grouping of leagues (usually a country)
#[derive(Debug, Clone, Default)]
pub struct Region {
    pub leagues: Vec<League>,
}

/// A betting league inside a region
#[derive(Debug, Clone, Default)]
pub struct League {
    pub id: i64,
    pub name: String,

    /// Provider's "top league" marker
    pub top: bool,
}

/// A match as listed in a league's event list
#[derive(Debug, Clone, Default)]
pub struct EventSummary {
    pub id: i64,

    /// Betline status ("prematch", "inplay", ...), empty when absent
    pub betline: String,
}

impl Sport {
    /// Build from a catalog sport node; missing fields default
    pub fn from_json(node: &Value) -> Self {
        Self {
            name: field_str(node, "name"),
            regions: field_array(node, "regions")
                .iter()
                .map(Region::from_json)
                .collect(),
        }
    }

    /// Every league under every region, in document order
    pub fn leagues(&self) -> impl Iterator<Item = &League> {
        self.regions.iter().flat_map(|r| r.leagues.iter())
    }
}

impl Region {
    /// Build from a region node, keeping its leagues in document order
    pub fn from_json(node: &Value) -> Self {
        Self {
            leagues: field_array(node, "leagues")
                .iter()
                .map(League::from_json)
                .collect(),
        }
    }
}

impl League {
    /// Build from a league node
    pub fn from_json(node: &Value) -> Self {
        Self {
            id: field_i64(node, "id"),
            name: field_str(node, "name"),
            top: field_bool(node, "top"),
        }
    }
}

impl EventSummary {
    /// Build from one entry of a league's `events` array
    pub fn from_json(node: &Value) -> Self {
        Self {
            id: field_i64(node, "id"),
            betline: field_str(node, "betline"),
        }
    }

    pub fn is_prematch(&self) -> bool {
        self.betline.eq_ignore_ascii_case("prematch")
    }

    /// Parse a league events response (`{ "events": [...] }`).
    ///
    /// Returns `None` when `events` is missing or not an array.
    pub fn list_from_json(doc: &Value) -> Option<Vec<Self>> {
        doc.get("events")
            .and_then(Value::as_array)
            .map(|events| events.iter().map(Self::from_json).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sport_from_json() {
        let sport = Sport::from_json(&json!({
            "name": "Tennis",
            "regions": [
                {"leagues": [{"id": 1, "name": "ATP", "top": true}]},
                {"leagues": [{"id": 2, "name": "WTA"}, {"id": 3, "name": "ITF", "top": false}]}
            ]
        }));

        assert_eq!(sport.name, "Tennis");
        assert_eq!(sport.regions.len(), 2);
        let ids: Vec<i64> = sport.leagues().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(sport.regions[0].leagues[0].top);
        assert!(!sport.regions[1].leagues[0].top);
    }

    #[test]
    fn test_sport_without_regions() {
        let sport = Sport::from_json(&json!({"name": "Football", "regions": null}));
        assert_eq!(sport.leagues().count(), 0);
    }

    #[test]
    fn test_event_list_requires_array() {
        assert!(EventSummary::list_from_json(&json!({})).is_none());
        assert!(EventSummary::list_from_json(&json!({"events": {}})).is_none());
        assert!(EventSummary::list_from_json(&json!([])).is_none());

        let events = EventSummary::list_from_json(&json!({
            "events": [{"id": 10, "betline": "PreMatch"}, {"id": 11}]
        }))
        .unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].is_prematch());
        assert!(!events[1].is_prematch());
    }
}
