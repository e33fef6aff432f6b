use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::fmt;

use super::error::{require_text, ModelError};
use super::ids::{RaceId, RunnerId, SchoolId};
use super::roster::Directory;
use super::values::{Gender, Pace, Time};
use crate::scoring::{score_race, ScoringRules, TeamScore};

/// Where a race was run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venue {
    pub name: String,
    pub city: String,
    pub state: String,
}

impl Venue {
    pub fn new(name: &str, city: &str, state: &str) -> Self {
        Self {
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
        }
    }
}

/// A runner's time in one race.
///
/// The race's distance and calendar year are captured at construction so a
/// performance can be ranked and resolved to a school on its own.
#[derive(Debug, Clone, Copy)]
pub struct Performance {
    runner: RunnerId,
    race: RaceId,
    distance: u32,
    year: i32,
    time: Time,
    points: Option<u32>,
}

impl Performance {
    pub fn new(runner: RunnerId, race: &Race, time: Time) -> Self {
        Self {
            runner,
            race: race.id,
            distance: race.distance,
            year: race.date.year(),
            time,
            points: None,
        }
    }

    pub fn runner(&self) -> RunnerId {
        self.runner
    }

    pub fn race(&self) -> RaceId {
        self.race
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Calendar year of the race.
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn time(&self) -> Time {
        self.time
    }

    /// Points earned in the race. `None` until scored, and for runners who
    /// did not score.
    pub fn points(&self) -> Option<u32> {
        self.points
    }

    pub(crate) fn set_points(&mut self, points: Option<u32>) {
        self.points = points;
    }

    pub fn pace(&self) -> Pace {
        Pace::new(self.time, self.distance)
    }

    /// The school the runner represented in the year of the race.
    pub fn school<D: Directory + ?Sized>(&self, directory: &D) -> Option<SchoolId> {
        directory.school_of(self.runner, self.year)
    }
}

/// Faster pace first; equal paces go to the shorter race.
impl Ord for Performance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pace()
            .cmp(&other.pace())
            .then_with(|| self.distance.cmp(&other.distance))
    }
}

impl PartialOrd for Performance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Performance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Performance {}

/// One gender's race at a meet, its results and, once scored, its team scores.
#[derive(Debug, Clone)]
pub struct Race {
    id: RaceId,
    meet: String,
    date: NaiveDate,
    gender: Gender,
    distance: u32,
    venue: Venue,
    pub(crate) results: Vec<Performance>,
    pub(crate) scores: Vec<TeamScore>,
    pub(crate) scored: bool,
}

impl Race {
    /// `distance` is the course length, conventionally in meters.
    pub fn new(
        id: RaceId,
        meet: &str,
        date: NaiveDate,
        gender: Gender,
        distance: u32,
        venue: Venue,
    ) -> Result<Self, ModelError> {
        require_text("meet name", meet)?;
        if distance == 0 {
            return Err(ModelError::invalid("race distance must be positive"));
        }
        Ok(Self {
            id,
            meet: meet.to_string(),
            date,
            gender,
            distance,
            venue,
            results: Vec::new(),
            scores: Vec::new(),
            scored: false,
        })
    }

    pub fn id(&self) -> RaceId {
        self.id
    }

    pub fn meet(&self) -> &str {
        &self.meet
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn venue(&self) -> &Venue {
        &self.venue
    }

    /// "Venue, City, State", leaving out blank parts.
    pub fn location(&self) -> String {
        [&self.venue.name, &self.venue.city, &self.venue.state]
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Results in performance order.
    pub fn results(&self) -> &[Performance] {
        &self.results
    }

    /// Team scores, best first. Empty until [`Race::score`] has run.
    pub fn scores(&self) -> &[TeamScore] {
        &self.scores
    }

    /// Whether the current results have been scored.
    pub fn is_scored(&self) -> bool {
        self.scored
    }

    /// Insert a result, keeping results in performance order. Ties are kept
    /// in insertion order. Existing scores go stale until the race is scored
    /// again.
    pub fn add_result(&mut self, performance: Performance) -> Result<(), ModelError> {
        if performance.race != self.id {
            return Err(ModelError::inconsistent(format!(
                "performance for {} added to {}",
                performance.race, self.id
            )));
        }
        let position = self.results.partition_point(|p| *p <= performance);
        self.results.insert(position, performance);
        self.scored = false;
        Ok(())
    }

    /// Score the race under the standard rules: five scorers, seven runners.
    pub fn score<D: Directory + ?Sized>(&mut self, directory: &D) -> Result<(), ModelError> {
        self.score_with(directory, &ScoringRules::default())
    }

    pub fn score_with<D: Directory + ?Sized>(
        &mut self,
        directory: &D,
        rules: &ScoringRules,
    ) -> Result<(), ModelError> {
        score_race(self, directory, rules)
    }
}

/// Every result `runner` has in `races`, in performance order. Equal
/// performances keep race order.
pub fn runner_history<'a, I>(runner: RunnerId, races: I) -> Vec<(&'a Race, &'a Performance)>
where
    I: IntoIterator<Item = &'a Race>,
{
    let mut history: Vec<(&Race, &Performance)> = races
        .into_iter()
        .flat_map(|race| {
            race.results
                .iter()
                .filter(move |p| p.runner == runner)
                .map(move |p| (race, p))
        })
        .collect();
    history.sort_by(|(ra, a), (rb, b)| a.cmp(b).then_with(|| ra.cmp(rb)));
    history
}

/// Date, meet, venue, city, state, then gender.
impl Ord for Race {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.meet.cmp(&other.meet))
            .then_with(|| self.venue.name.cmp(&other.venue.name))
            .then_with(|| self.venue.city.cmp(&other.venue.city))
            .then_with(|| self.venue.state.cmp(&other.venue.state))
            .then_with(|| self.gender.cmp(&other.gender))
    }
}

impl PartialOrd for Race {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Race {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Race {}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}'s {} m run, {} ({}), {}",
            self.gender.team_label(),
            self.distance,
            self.meet,
            self.date,
            self.location()
        )
    }
}
