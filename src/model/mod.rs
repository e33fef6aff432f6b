//! Runners, schools, races and the orders that rank them.

pub mod error;
pub mod ids;
pub mod order;
pub mod race;
pub mod roster;
pub mod runner;
pub mod school;
pub mod values;

pub use error::ModelError;
pub use ids::{RaceId, RunnerId, SchoolId};
pub use order::{compare_nullable, NullOrder};
pub use race::{runner_history, Performance, Race, Venue};
pub use roster::{Affiliation, Directory, Roster};
pub use runner::Runner;
pub use school::School;
pub use values::{Gender, Pace, Time};
