use std::fmt;
use std::str::FromStr;

use crate::models::EventSummary;

/// How a league's event list is narrowed to the events that get detail-fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventSelection {
    /// First `cap` events regardless of status
    FirstK,

    /// First `cap` events, stopping at the first one that is not prematch
    #[default]
    PrematchPrefix,
}

impl EventSelection {
    /// Take a prefix of `events` in document order. Never skips and continues.
    pub fn select<'a>(&self, events: &'a [EventSummary], cap: usize) -> &'a [EventSummary] {
        let prefix = match self {
            EventSelection::FirstK => events,
            EventSelection::PrematchPrefix => {
                let run = events
                    .iter()
                    .position(|e| !e.is_prematch())
                    .unwrap_or(events.len());
                &events[..run]
            }
        };
        &prefix[..prefix.len().min(cap)]
    }
}

impl FromStr for EventSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "first-k" => Ok(EventSelection::FirstK),
            "prematch" => Ok(EventSelection::PrematchPrefix),
            other => Err(format!(
                "unknown event selection '{other}' (expected 'prematch' or 'first')"
            )),
        }
    }
}

impl fmt::Display for EventSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSelection::FirstK => write!(f, "first"),
            EventSelection::PrematchPrefix => write!(f, "prematch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(statuses: &[&str]) -> Vec<EventSummary> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, s)| EventSummary {
                id: i as i64 + 1,
                betline: s.to_string(),
            })
            .collect()
    }

    fn ids(selected: &[EventSummary]) -> Vec<i64> {
        selected.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_first_k_ignores_status() {
        let list = events(&["inplay", "prematch", "prematch"]);
        assert_eq!(ids(EventSelection::FirstK.select(&list, 2)), vec![1, 2]);
    }

    #[test]
    fn test_prematch_prefix_caps() {
        let list = events(&["prematch", "PREMATCH", "prematch"]);
        assert_eq!(ids(EventSelection::PrematchPrefix.select(&list, 2)), vec![1, 2]);
    }

    #[test]
    fn test_prematch_prefix_stops_at_first_non_prematch() {
        let list = events(&["prematch", "inplay", "prematch", "prematch"]);
        assert_eq!(ids(EventSelection::PrematchPrefix.select(&list, 3)), vec![1]);

        let leading_live = events(&["inplay", "prematch"]);
        assert!(EventSelection::PrematchPrefix.select(&leading_live, 2).is_empty());
    }

    #[test]
    fn test_missing_status_is_not_prematch() {
        let list = events(&["prematch", ""]);
        assert_eq!(ids(EventSelection::PrematchPrefix.select(&list, 5)), vec![1]);
    }

    #[test]
    fn test_prefix_bound_matches_min_rule() {
        let pattern = ["prematch", "prematch", "prematch", "live", "prematch"];
        let list = events(&pattern);
        for cap in 0..7 {
            let selected = EventSelection::PrematchPrefix.select(&list, cap);
            assert_eq!(selected.len(), cap.min(3));
            assert_eq!(ids(selected), (1..=selected.len() as i64).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("first".parse::<EventSelection>(), Ok(EventSelection::FirstK));
        assert_eq!(" Prematch ".parse::<EventSelection>(), Ok(EventSelection::PrematchPrefix));
        assert!("all".parse::<EventSelection>().is_err());
    }
}
