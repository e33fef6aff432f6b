use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::schema::SheetFile;
use super::Meet;
use crate::model::{
    Performance, Race, RaceId, Roster, Runner, RunnerId, School, SchoolId, Venue,
};

/// Load a meet sheet from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid YAML, or
/// describes an inconsistent meet (see [`parse_sheet`]).
pub fn load_sheet(path: &Path) -> Result<Meet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read meet sheet at {}", path.display()))?;
    parse_sheet(&content).with_context(|| format!("Invalid meet sheet {}", path.display()))
}

/// Parse a meet sheet from YAML text.
pub fn parse_sheet(content: &str) -> Result<Meet> {
    let file: SheetFile =
        serde_saphyr::from_str(content).context("Failed to parse meet sheet: invalid YAML")?;
    build_meet(&file)
}

/// Turn a parsed sheet into a roster and its races.
///
/// Every problem in the sheet is reported at once, not just the first.
/// Races come back in race order; race ids follow their position in the
/// sheet.
pub fn build_meet(file: &SheetFile) -> Result<Meet> {
    let mut errors = Vec::new();
    let mut roster = Roster::new();

    let mut schools: HashMap<&str, SchoolId> = HashMap::new();
    for (i, entry) in file.schools.iter().enumerate() {
        if schools.contains_key(entry.key.as_str()) {
            errors.push(format!("schools[{}].key: duplicate '{}'", i, entry.key));
            continue;
        }
        let school = School::new(
            &entry.name,
            &entry.kind,
            entry.name_first,
            entry.conference.as_deref(),
        )
        .and_then(|school| roster.add_school(school));
        match school {
            Ok(id) => {
                schools.insert(&entry.key, id);
            }
            Err(e) => errors.push(format!("schools[{}]: {}", i, e)),
        }
    }

    let mut runners: HashMap<&str, RunnerId> = HashMap::new();
    for (i, entry) in file.runners.iter().enumerate() {
        if runners.contains_key(entry.key.as_str()) {
            errors.push(format!("runners[{}].key: duplicate '{}'", i, entry.key));
            continue;
        }
        let runner = Runner::new(&entry.surname, &entry.given_name, entry.gender, entry.year)
            .and_then(|runner| roster.add_runner(runner));
        let id = match runner {
            Ok(id) => id,
            Err(e) => {
                errors.push(format!("runners[{}]: {}", i, e));
                continue;
            }
        };
        runners.insert(&entry.key, id);

        for (year, school_key) in &entry.schools {
            match schools.get(school_key.as_str()) {
                Some(&school) => {
                    if let Err(e) = roster.affiliate(id, school, *year) {
                        errors.push(format!("runners[{}].schools.{}: {}", i, year, e));
                    }
                }
                None => errors.push(format!(
                    "runners[{}].schools.{}: unknown school '{}'",
                    i, year, school_key
                )),
            }
        }
    }

    let mut races = Vec::with_capacity(file.races.len());
    for (i, entry) in file.races.iter().enumerate() {
        let venue = Venue::new(&entry.venue, &entry.city, &entry.state);
        let mut race = match Race::new(
            RaceId::new(i as u32),
            &entry.meet,
            entry.date,
            entry.gender,
            entry.distance,
            venue,
        ) {
            Ok(race) => race,
            Err(e) => {
                errors.push(format!("races[{}]: {}", i, e));
                continue;
            }
        };

        for (j, result) in entry.results.iter().enumerate() {
            let Some(&runner) = runners.get(result.runner.as_str()) else {
                errors.push(format!(
                    "races[{}].results[{}].runner: unknown runner '{}'",
                    i, j, result.runner
                ));
                continue;
            };
            let time = match result.time.to_time() {
                Ok(time) => time,
                Err(e) => {
                    errors.push(format!("races[{}].results[{}].time: {}", i, j, e));
                    continue;
                }
            };
            if let Some(r) = roster.runner(runner) {
                if r.gender() != race.gender() {
                    warn!(runner = %r, race = %race, "runner gender does not match race");
                }
            }
            if let Err(e) = race.add_result(Performance::new(runner, &race, time)) {
                errors.push(format!("races[{}].results[{}]: {}", i, j, e));
            }
        }
        races.push(race);
    }

    if !errors.is_empty() {
        bail!("{} problem(s) in meet sheet:\n  - {}", errors.len(), errors.join("\n  - "));
    }

    races.sort();
    debug!(
        schools = schools.len(),
        runners = runners.len(),
        races = races.len(),
        "loaded meet sheet"
    );
    Ok(Meet {
        roster,
        races,
        runner_keys: runners.into_iter().map(|(k, id)| (k.to_string(), id)).collect(),
        school_keys: schools.into_iter().map(|(k, id)| (k.to_string(), id)).collect(),
    })
}
