use std::cmp::Ordering;
use std::fmt;

use super::error::{require_text, ModelError};
use super::order::{compare_nullable, NullOrder};
use super::roster::Affiliation;

/// A college or university that fields a cross-country team.
#[derive(Debug, Clone)]
pub struct School {
    name: String,
    kind: String,
    name_first: bool,
    conference: Option<String>,
    pub(crate) affiliations: Vec<Affiliation>,
}

impl School {
    /// `name` is the distinguishing part ("Linfield", "Puget Sound"), `kind`
    /// the institution type ("College", "University"). `name_first` chooses
    /// between "Linfield College" and "University of Puget Sound".
    pub fn new(
        name: &str,
        kind: &str,
        name_first: bool,
        conference: Option<&str>,
    ) -> Result<Self, ModelError> {
        require_text("school name", name)?;
        require_text("school type", kind)?;
        Ok(Self {
            name: name.to_string(),
            kind: kind.to_string(),
            name_first,
            conference: conference.map(str::to_string),
            affiliations: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name_first(&self) -> bool {
        self.name_first
    }

    pub fn conference(&self) -> Option<&str> {
        self.conference.as_deref()
    }

    /// "Linfield College" or "University of Puget Sound".
    pub fn full_name(&self) -> String {
        if self.name_first {
            format!("{} {}", self.name, self.kind)
        } else {
            format!("{} of {}", self.kind, self.name)
        }
    }

    /// Everyone who has run for this school, in affiliation order.
    pub fn affiliations(&self) -> &[Affiliation] {
        &self.affiliations
    }

    /// The most recent year anyone ran for this school.
    pub fn latest_season(&self) -> Option<i32> {
        self.affiliations.iter().map(|a| a.year).max()
    }
}

/// Name, then type, then full name (only when the naming styles differ), then
/// conference with unknown conferences last.
impl Ord for School {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| {
                if self.name_first != other.name_first {
                    self.full_name().cmp(&other.full_name())
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| {
                compare_nullable(
                    self.conference.as_deref(),
                    other.conference.as_deref(),
                    NullOrder::Last,
                )
            })
    }
}

impl PartialOrd for School {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for School {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for School {}

impl fmt::Display for School {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}
