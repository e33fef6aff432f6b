use serde::Serialize;
use std::fmt;

/// Handle to a runner owned by a [`Roster`](super::Roster).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RunnerId(pub(crate) usize);

/// Handle to a school owned by a [`Roster`](super::Roster).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SchoolId(pub(crate) usize);

/// Identifies a race. Assigned by whoever creates the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RaceId(u32);

impl RunnerId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl SchoolId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl RaceId {
    pub fn new(id: u32) -> Self {
        RaceId(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RunnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "runner#{}", self.0)
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "school#{}", self.0)
    }
}

impl fmt::Display for RaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "race#{}", self.0)
    }
}
