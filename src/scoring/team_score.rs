use std::cmp::Ordering;

use super::config::ScoringRules;
use crate::model::{compare_nullable, Directory, NullOrder, Performance, SchoolId, Time};

/// One school's result in one race.
///
/// Built fresh every time a race is scored. `runners` holds every finisher
/// the school had, in finish order, with the points they were given.
#[derive(Debug, Clone)]
pub struct TeamScore {
    school: SchoolId,
    runners: Vec<Performance>,
    rules: ScoringRules,
}

impl TeamScore {
    pub(crate) fn new(school: SchoolId, runners: Vec<Performance>, rules: ScoringRules) -> Self {
        Self {
            school,
            runners,
            rules,
        }
    }

    pub fn school(&self) -> SchoolId {
        self.school
    }

    pub fn runners(&self) -> &[Performance] {
        &self.runners
    }

    /// Sum of the scorers' points; `None` for a team that did not field a
    /// full team.
    pub fn score(&self) -> Option<u32> {
        if self.runners.len() < self.rules.team_size {
            return None;
        }
        self.runners[..self.rules.team_size]
            .iter()
            .map(Performance::points)
            .sum()
    }

    pub fn top_five_average(&self) -> Option<Time> {
        self.top_average(5)
    }

    pub fn top_seven_average(&self) -> Option<Time> {
        self.top_average(7)
    }

    /// Mean time of the first `count` runners, or of all of them if fewer.
    pub fn top_average(&self, count: usize) -> Option<Time> {
        Time::mean(self.runners.iter().take(count).map(Performance::time))
    }

    /// Compare the runner at 0-based `index` on each team.
    ///
    /// A team without a runner there loses to a team with one; if neither has
    /// one the teams stay tied. Otherwise fewer points wins.
    pub fn break_tie(&self, other: &TeamScore, index: usize) -> Ordering {
        match (self.runners.get(index), other.runners.get(index)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => compare_nullable(a.points(), b.points(), NullOrder::Last),
        }
    }

    /// Team ranking: lower score first with unscored teams last, then each
    /// displacer in turn, then school order.
    pub fn compare<D: Directory + ?Sized>(&self, other: &TeamScore, directory: &D) -> Ordering {
        compare_nullable(self.score(), other.score(), NullOrder::Last)
            .then_with(|| {
                self.rules
                    .displacers()
                    .map(|index| self.break_tie(other, index))
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| {
                compare_nullable(
                    directory.school(self.school),
                    directory.school(other.school),
                    NullOrder::Last,
                )
            })
    }
}
