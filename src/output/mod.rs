pub mod formatter;
pub mod profile;
pub mod report;
pub mod table;

pub use formatter::{
    format_race, format_race_list, format_results, format_team_scores, format_tsv,
    should_use_colors,
};
pub use profile::{format_runner, format_team};
pub use report::{load_report, write_report, RaceReport, ResultRow, TeamRow};
pub use table::{Align, Table};
