use std::io::IsTerminal;

use super::table::{center, Align, Table};
use crate::model::{Performance, Race, Roster};
use crate::scoring::TeamScore;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

fn runner_name(roster: &Roster, performance: &Performance) -> String {
    roster
        .runner(performance.runner())
        .map(|r| r.name())
        .unwrap_or_default()
}

fn school_name(roster: &Roster, performance: &Performance) -> String {
    performance
        .school(roster)
        .and_then(|id| roster.school(id))
        .map(|s| s.name().to_string())
        .unwrap_or_default()
}

fn blank_if_none<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// The results table, one row per finisher in finish order.
///
/// Columns: place, Name, Year, School, Finals, Points. Runners without a
/// school for the race's year and runners who did not score leave those
/// cells blank.
pub fn format_results(race: &Race, roster: &Roster, use_colors: bool) -> Vec<String> {
    let mut table = Table::new(&[
        ("", Align::Right),
        ("Name", Align::Left),
        ("Year", Align::Left),
        ("School", Align::Left),
        ("Finals", Align::Left),
        ("Points", Align::Right),
    ])
    .with_title(format!("{} m run CC", race.distance()));

    for (i, performance) in race.results().iter().enumerate() {
        let year = roster
            .runner(performance.runner())
            .and_then(|r| r.year());
        table.push_row(vec![
            (i + 1).to_string(),
            runner_name(roster, performance),
            blank_if_none(year),
            school_name(roster, performance),
            performance.time().to_string(),
            blank_if_none(performance.points()),
        ]);
    }
    table.render(use_colors)
}

/// The team-score table, teams in rank order.
///
/// Teams without a score get neither a rank nor a total. Each team row is
/// followed by its top-five average and, for teams that fielded more than
/// five, its top-seven average.
pub fn format_team_scores(scores: &[TeamScore], roster: &Roster, use_colors: bool) -> Vec<String> {
    let mut columns = vec![
        ("Rank", Align::Right),
        ("Team", Align::Left),
        ("Total", Align::Right),
    ];
    let positions = ["1", "2", "3", "4", "5", "*6", "*7"];
    columns.extend(positions.iter().map(|p| (*p, Align::Right)));
    let mut table = Table::new(&columns).with_title("Team Scores");

    for (i, team) in scores.iter().enumerate() {
        let score = team.score();
        let mut row = vec![
            if score.is_some() {
                (i + 1).to_string()
            } else {
                String::new()
            },
            roster
                .school(team.school())
                .map(|s| s.name().to_string())
                .unwrap_or_default(),
            blank_if_none(score),
        ];
        row.extend(
            (0..positions.len())
                .map(|j| blank_if_none(team.runners().get(j).and_then(Performance::points))),
        );
        table.push_row(row);

        table.push_row(vec![
            String::new(),
            format!("  Top 5 Avg: {}", blank_if_none(team.top_five_average())),
        ]);
        if team.runners().len() > 5 {
            table.push_row(vec![
                String::new(),
                format!("  Top 7 Avg: {}", blank_if_none(team.top_seven_average())),
            ]);
        }
    }
    table.render(use_colors)
}

/// A full race sheet: optional centred header (meet, date, location), the
/// results table, a blank line and the team scores.
pub fn format_race(race: &Race, roster: &Roster, show_header: bool, use_colors: bool) -> String {
    let results = format_results(race, roster, use_colors);
    let mut lines = Vec::new();

    if show_header {
        let width = results
            .iter()
            .skip(1)
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        lines.push(center(race.meet(), width));
        lines.push(center(&race.date().to_string(), width));
        lines.push(center(&race.location(), width));
        lines.push(String::new());
    }

    lines.extend(results);
    lines.push(String::new());
    lines.extend(format_team_scores(race.scores(), roster, use_colors));
    lines.join("\n")
}

/// Format results as tab-separated values for scripting
/// Columns: place, name, school, time, points (no headers, no colors)
pub fn format_tsv(race: &Race, roster: &Roster) -> String {
    race.results()
        .iter()
        .enumerate()
        .map(|(i, performance)| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                i + 1,
                runner_name(roster, performance),
                school_name(roster, performance),
                performance.time(),
                blank_if_none(performance.points())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per race for `list`: "  1. 2009-10-31  Men's 8000 m  NWC Championships"
pub fn format_race_list(races: &[Race], use_colors: bool) -> String {
    if races.is_empty() {
        return "No races found.".to_string();
    }

    races
        .iter()
        .enumerate()
        .map(|(i, race)| {
            let index = format!("{:>3}.", i + 1);
            let kind = format!("{}'s {} m", race.gender().team_label(), race.distance());
            if use_colors {
                use owo_colors::OwoColorize;
                format!(
                    "{} {}  {:<16}  {}",
                    index.dimmed(),
                    race.date(),
                    kind,
                    race.meet().bold()
                )
            } else {
                format!("{} {}  {:<16}  {}", index, race.date(), kind, race.meet())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
