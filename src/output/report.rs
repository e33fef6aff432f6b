use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::model::{Gender, Performance, Race, Roster};

const REPORT_VERSION: u32 = 1;

/// A scored race, flattened for JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceReport {
    pub version: u32,
    pub meet: String,
    pub date: NaiveDate,
    pub gender: Gender,
    pub distance: u32,
    pub location: String,
    pub scored: bool,
    pub results: Vec<ResultRow>,
    pub teams: Vec<TeamRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub place: usize,
    pub name: String,
    pub year: Option<i32>,
    pub school: Option<String>,
    /// "m:ss.ss"
    pub time: String,
    pub seconds: f64,
    pub points: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRow {
    /// None for teams that did not score
    pub rank: Option<usize>,
    pub school: String,
    pub score: Option<u32>,
    /// Points of each finisher in team order
    pub points: Vec<Option<u32>>,
    pub top_five_average: Option<String>,
    pub top_seven_average: Option<String>,
}

fn school_of(roster: &Roster, performance: &Performance) -> Option<String> {
    performance
        .school(roster)
        .and_then(|id| roster.school(id))
        .map(|s| s.name().to_string())
}

impl RaceReport {
    pub fn new(race: &Race, roster: &Roster) -> Self {
        let results = race
            .results()
            .iter()
            .enumerate()
            .map(|(i, performance)| {
                let runner = roster.runner(performance.runner());
                ResultRow {
                    place: i + 1,
                    name: runner.map(|r| r.name()).unwrap_or_default(),
                    year: runner.and_then(|r| r.year()),
                    school: school_of(roster, performance),
                    time: performance.time().to_string(),
                    seconds: performance.time().seconds(),
                    points: performance.points(),
                }
            })
            .collect();

        let teams = race
            .scores()
            .iter()
            .enumerate()
            .map(|(i, team)| TeamRow {
                rank: team.score().map(|_| i + 1),
                school: roster
                    .school(team.school())
                    .map(|s| s.name().to_string())
                    .unwrap_or_default(),
                score: team.score(),
                points: team.runners().iter().map(Performance::points).collect(),
                top_five_average: team.top_five_average().map(|t| t.to_string()),
                top_seven_average: (team.runners().len() > 5)
                    .then(|| team.top_seven_average().map(|t| t.to_string()))
                    .flatten(),
            })
            .collect();

        Self {
            version: REPORT_VERSION,
            meet: race.meet().to_string(),
            date: race.date(),
            gender: race.gender(),
            distance: race.distance(),
            location: race.location(),
            scored: race.is_scored(),
            results,
            teams,
        }
    }
}

/// Write a report as pretty JSON, atomically: readers see either the old
/// file or the complete new one.
pub fn write_report(path: &Path, report: &RaceReport) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, report).context("Failed to serialize race report")?;

    file.commit()
        .with_context(|| format!("Failed to save race report to {}", path.display()))?;

    Ok(())
}

/// Read back a report written by [`write_report`].
pub fn load_report(path: &Path) -> Result<RaceReport> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open race report at {}", path.display()))?;

    let report: RaceReport =
        serde_json::from_reader(file).context("Failed to load race report")?;

    if report.version != REPORT_VERSION {
        anyhow::bail!(
            "Unsupported race report version {} (expected {})",
            report.version,
            REPORT_VERSION
        );
    }

    Ok(report)
}
