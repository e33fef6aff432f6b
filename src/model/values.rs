use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::error::ModelError;

/// Gender of a runner or a race. Men always sort before women.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// "Men" or "Women", as printed in race titles.
    pub fn team_label(self) -> &'static str {
        match self {
            Gender::Male => "Men",
            Gender::Female => "Women",
        }
    }
}

impl FromStr for Gender {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" | "men" => Ok(Gender::Male),
            "f" | "female" | "women" => Ok(Gender::Female),
            _ => Err(ModelError::parse("gender", s)),
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "M"),
            Gender::Female => write!(f, "F"),
        }
    }
}

/// A finishing time in seconds. Always finite and non-negative.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct Time(f64);

impl Time {
    pub fn from_seconds(seconds: f64) -> Result<Self, ModelError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ModelError::invalid(format!(
                "time must be a non-negative number of seconds, got {}",
                seconds
            )));
        }
        // -0.0 would sort below 0.0 under total_cmp
        Ok(Time(seconds + 0.0))
    }

    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Mean of the given times, `None` when there are none.
    pub fn mean<I: IntoIterator<Item = Time>>(times: I) -> Option<Time> {
        let (sum, count) = times
            .into_iter()
            .fold((0.0, 0usize), |(sum, count), t| (sum + t.0, count + 1));
        if count == 0 {
            None
        } else {
            Some(Time(sum / count as f64))
        }
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Parses "ss.s", "m:ss.s" or "h:mm:ss.s".
impl FromStr for Time {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ModelError::parse("time", s);
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.is_empty() || parts.len() > 3 {
            return Err(err());
        }

        let (whole, last) = parts.split_at(parts.len() - 1);
        let seconds: f64 = last[0].trim().parse().map_err(|_| err())?;
        if !whole.is_empty() && !(0.0..60.0).contains(&seconds) {
            return Err(err());
        }

        let mut total = 0.0;
        for (i, part) in whole.iter().enumerate() {
            let value: u32 = part.trim().parse().map_err(|_| err())?;
            // Minutes below an hour part
            if i > 0 && value >= 60 {
                return Err(err());
            }
            total = total * 60.0 + f64::from(value);
        }
        Time::from_seconds(total * 60.0 + seconds).map_err(|_| err())
    }
}

/// Formats as "m:ss.ss", e.g. `25:02.10`.
impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hundredths = (self.0 * 100.0).round() as u64;
        let minutes = hundredths / 6000;
        let rest = hundredths % 6000;
        write!(f, "{}:{:02}.{:02}", minutes, rest / 100, rest % 100)
    }
}

/// Time per unit of race distance. Only meaningful for ranking.
#[derive(Debug, Clone, Copy)]
pub struct Pace(f64);

impl Pace {
    /// `distance` must be positive; races enforce that at construction.
    pub fn new(time: Time, distance: u32) -> Self {
        Pace(time.seconds() / f64::from(distance) * 60.0)
    }
}

impl PartialEq for Pace {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pace {}

impl PartialOrd for Pace {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pace {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
