pub mod config;
pub mod engine;
pub mod team_score;
pub mod validation;

pub use config::ScoringRules;
pub use engine::score_race;
pub use team_score::TeamScore;
pub use validation::validate_rules;
