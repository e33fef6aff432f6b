//! Cross-country race scoring.
//!
//! [`model`] holds runners, schools and races; [`scoring`] assigns points and
//! ranks teams; [`sheet`] loads meets from YAML; [`output`] prints and
//! exports scored races.

pub mod config;
pub mod model;
pub mod output;
pub mod scoring;
pub mod sheet;
