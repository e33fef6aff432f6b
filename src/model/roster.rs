use std::cmp::Ordering;

use super::error::ModelError;
use super::ids::{RunnerId, SchoolId};
use super::order::{compare_nullable, NullOrder};
use super::runner::Runner;
use super::school::School;
use super::values::Gender;

/// Records that a runner competed for a school in a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Affiliation {
    pub(crate) runner: RunnerId,
    pub(crate) school: SchoolId,
    pub(crate) year: i32,
}

impl Affiliation {
    pub fn runner(&self) -> RunnerId {
        self.runner
    }

    pub fn school(&self) -> SchoolId {
        self.school
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

/// Lookups the scoring engine needs from whatever owns runners and schools.
pub trait Directory {
    /// The school `runner` ran for during calendar `year`.
    fn school_of(&self, runner: RunnerId, year: i32) -> Option<SchoolId>;

    fn runner(&self, id: RunnerId) -> Option<&Runner>;

    fn school(&self, id: SchoolId) -> Option<&School>;
}

/// Owns every runner and school and the affiliations between them.
///
/// Runners and schools are unique under their own order: adding one that
/// compares equal to an existing entry is rejected, so handle equality and
/// entity equality never disagree.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    runners: Vec<Runner>,
    schools: Vec<School>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_runner(&mut self, runner: Runner) -> Result<RunnerId, ModelError> {
        if self.runners.iter().any(|r| *r == runner) {
            return Err(ModelError::invalid(format!("duplicate runner {}", runner)));
        }
        self.runners.push(runner);
        Ok(RunnerId(self.runners.len() - 1))
    }

    pub fn add_school(&mut self, school: School) -> Result<SchoolId, ModelError> {
        if self.schools.iter().any(|s| *s == school) {
            return Err(ModelError::invalid(format!("duplicate school {}", school)));
        }
        self.schools.push(school);
        Ok(SchoolId(self.schools.len() - 1))
    }

    pub fn runner(&self, id: RunnerId) -> Option<&Runner> {
        self.runners.get(id.0)
    }

    pub fn school(&self, id: SchoolId) -> Option<&School> {
        self.schools.get(id.0)
    }

    pub fn runners(&self) -> impl Iterator<Item = (RunnerId, &Runner)> {
        self.runners.iter().enumerate().map(|(i, r)| (RunnerId(i), r))
    }

    pub fn schools(&self) -> impl Iterator<Item = (SchoolId, &School)> {
        self.schools.iter().enumerate().map(|(i, s)| (SchoolId(i), s))
    }

    /// Affiliate `runner` with `school` for `year`.
    ///
    /// A runner holds one school per year: an existing affiliation for the
    /// same year is replaced and dropped from its school's roster. The new
    /// affiliation is inserted into the school's roster at its sorted position.
    pub fn affiliate(
        &mut self,
        runner: RunnerId,
        school: SchoolId,
        year: i32,
    ) -> Result<Affiliation, ModelError> {
        if self.runner(runner).is_none() {
            return Err(ModelError::invalid(format!("unknown {}", runner)));
        }
        if self.school(school).is_none() {
            return Err(ModelError::invalid(format!("unknown {}", school)));
        }

        let affiliation = Affiliation {
            runner,
            school,
            year,
        };
        if let Some(previous) = self.runners[runner.0].affiliations.insert(year, affiliation) {
            self.schools[previous.school.0]
                .affiliations
                .retain(|a| *a != previous);
        }

        let position = self.schools[school.0]
            .affiliations
            .partition_point(|a| self.compare_affiliations(a, &affiliation) != Ordering::Greater);
        self.schools[school.0]
            .affiliations
            .insert(position, affiliation);
        Ok(affiliation)
    }

    /// Affiliation order: school, then runner, then year.
    pub fn compare_affiliations(&self, a: &Affiliation, b: &Affiliation) -> Ordering {
        compare_nullable(self.school(a.school), self.school(b.school), NullOrder::Last)
            .then_with(|| {
                compare_nullable(self.runner(a.runner), self.runner(b.runner), NullOrder::Last)
            })
            .then_with(|| a.year.cmp(&b.year))
    }

    /// A runner's affiliations in affiliation order.
    pub fn runner_affiliations(&self, runner: RunnerId) -> Vec<Affiliation> {
        let mut affiliations: Vec<Affiliation> = self
            .runner(runner)
            .map(|r| r.affiliations_by_year().copied().collect())
            .unwrap_or_default();
        affiliations.sort_by(|a, b| self.compare_affiliations(a, b));
        affiliations
    }

    /// The runners of one gender who ran for `school` in `year`, in runner order.
    pub fn team(&self, school: SchoolId, year: i32, gender: Gender) -> Vec<RunnerId> {
        let mut team: Vec<RunnerId> = self
            .school(school)
            .map(|s| {
                s.affiliations()
                    .iter()
                    .filter(|a| a.year == year)
                    .map(|a| a.runner)
                    .filter(|id| self.runner(*id).is_some_and(|r| r.gender() == gender))
                    .collect()
            })
            .unwrap_or_default();
        team.sort_by(|a, b| compare_nullable(self.runner(*a), self.runner(*b), NullOrder::Last));
        team
    }
}

impl Directory for Roster {
    fn school_of(&self, runner: RunnerId, year: i32) -> Option<SchoolId> {
        self.runner(runner)?.school(year)
    }

    fn runner(&self, id: RunnerId) -> Option<&Runner> {
        Roster::runner(self, id)
    }

    fn school(&self, id: SchoolId) -> Option<&School> {
        Roster::school(self, id)
    }
}
