use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{Gender, ModelError, Time};

/// A meet sheet: everything needed to score one or more races.
///
/// Runners and schools are declared once and referred to by `key` from
/// affiliations and results.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SheetFile {
    #[serde(default)]
    pub schools: Vec<SchoolEntry>,
    #[serde(default)]
    pub runners: Vec<RunnerEntry>,
    #[serde(default)]
    pub races: Vec<RaceEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchoolEntry {
    pub key: String,
    pub name: String,
    /// "College", "University", ...
    #[serde(rename = "type")]
    pub kind: String,
    /// true for "Linfield College", false for "University of Puget Sound"
    #[serde(default = "default_name_first")]
    pub name_first: bool,
    #[serde(default)]
    pub conference: Option<String>,
}

fn default_name_first() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerEntry {
    pub key: String,
    pub surname: String,
    pub given_name: String,
    pub gender: Gender,
    /// Graduation year, if known
    #[serde(default)]
    pub year: Option<i32>,
    /// Calendar year -> school key
    #[serde(default)]
    pub schools: BTreeMap<i32, String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RaceEntry {
    pub meet: String,
    pub date: NaiveDate,
    pub gender: Gender,
    /// Course length in meters
    pub distance: u32,
    pub venue: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub results: Vec<ResultEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResultEntry {
    /// Runner key
    pub runner: String,
    pub time: TimeValue,
}

/// A finishing time as written in a sheet: `1502.1` or `"25:02.1"`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TimeValue {
    Seconds(f64),
    Text(String),
}

impl TimeValue {
    pub fn to_time(&self) -> Result<Time, ModelError> {
        match self {
            TimeValue::Seconds(seconds) => Time::from_seconds(*seconds),
            TimeValue::Text(text) => text.parse(),
        }
    }
}
