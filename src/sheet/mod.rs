//! Meet sheets: a YAML description of schools, runners and race results.

pub mod loader;
pub mod schema;

pub use loader::{build_meet, load_sheet, parse_sheet};
pub use schema::SheetFile;

use std::collections::BTreeMap;

use crate::model::{runner_history, ModelError, Performance, Race, Roster, RunnerId, SchoolId};
use crate::scoring::ScoringRules;

/// A loaded meet: the people involved and their races, in race order.
#[derive(Debug, Clone, Default)]
pub struct Meet {
    pub roster: Roster,
    pub races: Vec<Race>,
    /// Sheet keys, for looking people up from the command line
    pub runner_keys: BTreeMap<String, RunnerId>,
    pub school_keys: BTreeMap<String, SchoolId>,
}

impl Meet {
    pub fn runner_by_key(&self, key: &str) -> Option<RunnerId> {
        self.runner_keys.get(key).copied()
    }

    pub fn school_by_key(&self, key: &str) -> Option<SchoolId> {
        self.school_keys.get(key).copied()
    }

    /// Every race result of `runner`, in performance order.
    pub fn performances_of(&self, runner: RunnerId) -> Vec<(&Race, &Performance)> {
        runner_history(runner, &self.races)
    }

    /// Score the race at `index` (0-based) and return it.
    pub fn score(&mut self, index: usize, rules: &ScoringRules) -> Result<&Race, ModelError> {
        let count = self.races.len();
        let race = self.races.get_mut(index).ok_or_else(|| {
            ModelError::InvalidArgument(format!("no race at index {} (have {})", index, count))
        })?;
        race.score_with(&self.roster, rules)?;
        Ok(race)
    }

    pub fn score_all(&mut self, rules: &ScoringRules) -> Result<(), ModelError> {
        for race in &mut self.races {
            race.score_with(&self.roster, rules)?;
        }
        Ok(())
    }
}
