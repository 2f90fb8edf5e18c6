use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::models::{League, Sport};

/// A top league from a supported sport, ready for a league-events fetch
#[derive(Debug, Clone)]
pub struct LeagueTarget {
    pub sport_name: String,
    pub league: League,
}

/// Decides which parts of the catalog are worth fetching
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    target_sports: HashSet<String>,
}

impl CatalogFilter {
    /// Filter accepting the sports named in `target_sports` (exact, case-sensitive)
    pub fn new<I, S>(target_sports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_sports: target_sports.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `sport` is one of the target sport names
    pub fn is_sport_supported(&self, sport: &Sport) -> bool {
        self.target_sports.contains(&sport.name)
    }

    pub fn is_top_league(league: &League) -> bool {
        league.top
    }

    /// Walk a catalog document and collect the leagues to fetch, in document order.
    ///
    /// Returns `None` when the document is not an array.
    pub fn select_leagues(&self, catalog: &Value) -> Option<Vec<LeagueTarget>> {
        let sports = catalog.as_array()?;
        let mut targets = Vec::new();

        for node in sports {
            let sport = Sport::from_json(node);
            if !self.is_sport_supported(&sport) {
                debug!("Skipping sport '{}'", sport.name);
                continue;
            }

            for league in sport.leagues().filter(|l| Self::is_top_league(l)) {
                targets.push(LeagueTarget {
                    sport_name: sport.name.clone(),
                    league: league.clone(),
                });
            }
        }

        Some(targets)
    }
}
