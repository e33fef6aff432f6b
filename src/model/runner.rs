use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use super::error::{require_text, ModelError};
use super::ids::SchoolId;
use super::order::{compare_nullable, NullOrder};
use super::roster::Affiliation;
use super::values::Gender;

/// A runner and the schools they ran for.
#[derive(Debug, Clone)]
pub struct Runner {
    surname: String,
    given_name: String,
    gender: Gender,
    year: Option<i32>,
    /// One affiliation per calendar year.
    pub(crate) affiliations: BTreeMap<i32, Affiliation>,
}

impl Runner {
    /// `year` is the original graduation year, if known.
    pub fn new(
        surname: &str,
        given_name: &str,
        gender: Gender,
        year: Option<i32>,
    ) -> Result<Self, ModelError> {
        require_text("surname", surname)?;
        require_text("given name", given_name)?;
        Ok(Self {
            surname: surname.to_string(),
            given_name: given_name.to_string(),
            gender,
            year,
            affiliations: BTreeMap::new(),
        })
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// "Given Surname".
    pub fn name(&self) -> String {
        format!("{} {}", self.given_name, self.surname)
    }

    /// The school this runner ran for in the given calendar year.
    pub fn school(&self, year: i32) -> Option<SchoolId> {
        self.affiliations.get(&year).map(|a| a.school)
    }

    /// The school of the most recent affiliated year.
    pub fn last_school(&self) -> Option<SchoolId> {
        self.affiliations.values().next_back().map(|a| a.school)
    }

    /// Affiliations keyed by year, earliest first.
    pub fn affiliations_by_year(&self) -> impl Iterator<Item = &Affiliation> {
        self.affiliations.values()
    }
}

/// Surname, given name, graduation year (unknown years last), then gender.
impl Ord for Runner {
    fn cmp(&self, other: &Self) -> Ordering {
        self.surname
            .cmp(&other.surname)
            .then_with(|| self.given_name.cmp(&other.given_name))
            .then_with(|| compare_nullable(self.year, other.year, NullOrder::Last))
            .then_with(|| self.gender.cmp(&other.gender))
    }
}

impl PartialOrd for Runner {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Runner {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Runner {}

impl fmt::Display for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{} ({})", self.name(), year),
            None => f.write_str(&self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn runner(surname: &str, given: &str, gender: Gender, year: Option<i32>) -> Runner {
        Runner::new(surname, given, gender, year).unwrap()
    }

    #[test]
    fn test_name() {
        let r = runner("Prefontaine", "Steve", Gender::Male, Some(1973));
        assert_eq!(r.name(), "Steve Prefontaine");
        assert_eq!(r.to_string(), "Steve Prefontaine (1973)");
    }

    #[test]
    fn test_rejects_blank_names() {
        assert!(Runner::new("", "Steve", Gender::Male, None).is_err());
        assert!(Runner::new("Prefontaine", " ", Gender::Male, None).is_err());
    }

    #[test]
    fn test_orders_by_surname_then_given_name() {
        let a = runner("Adams", "Zed", Gender::Male, None);
        let b = runner("Baker", "Amy", Gender::Female, Some(2010));
        let c = runner("Baker", "Bob", Gender::Male, Some(2010));
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_known_year_sorts_before_unknown() {
        let known = runner("Baker", "Sam", Gender::Male, Some(2012));
        let unknown = runner("Baker", "Sam", Gender::Male, None);
        assert!(known < unknown);
        assert!(runner("Baker", "Sam", Gender::Male, Some(2011)) < known);
    }

    #[test]
    fn test_gender_is_final_tiebreak() {
        let man = runner("Baker", "Sam", Gender::Male, None);
        let woman = runner("Baker", "Sam", Gender::Female, None);
        assert!(man < woman);
        assert_ne!(man, woman);
    }

    #[test]
    fn test_no_affiliations() {
        let r = runner("Baker", "Sam", Gender::Male, None);
        assert!(r.school(2010).is_none());
        assert!(r.last_school().is_none());
    }

    fn arb_runner() -> impl Strategy<Value = Runner> {
        (
            prop::sample::select(vec!["Adams", "Baker"]),
            prop::sample::select(vec!["Amy", "Sam"]),
            prop::sample::select(vec![Gender::Male, Gender::Female]),
            prop::option::of(2008..2011i32),
        )
            .prop_map(|(s, g, gender, year)| runner(s, g, gender, year))
    }

    proptest! {
        #[test]
        fn prop_order_is_antisymmetric(a in arb_runner(), b in arb_runner()) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        }

        #[test]
        fn prop_order_is_transitive(a in arb_runner(), b in arb_runner(), c in arb_runner()) {
            if a <= b && b <= c {
                prop_assert!(a <= c);
            }
        }

        #[test]
        fn prop_equal_only_when_identity_matches(a in arb_runner(), b in arb_runner()) {
            let same = a.surname() == b.surname()
                && a.given_name() == b.given_name()
                && a.year() == b.year()
                && a.gender() == b.gender();
            prop_assert_eq!(a == b, same);
        }
    }
}
