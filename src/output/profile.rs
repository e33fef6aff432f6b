use owo_colors::OwoColorize;

use super::table::{Align, Table};
use crate::model::{Gender, RunnerId, SchoolId};
use crate::sheet::Meet;

/// A runner's career in this meet sheet: who they are, where they ran, and
/// every result in performance order. `None` if the runner is unknown.
pub fn format_runner(meet: &Meet, id: RunnerId, use_colors: bool) -> Option<String> {
    let runner = meet.roster.runner(id)?;
    let school_name = |school: SchoolId| {
        meet.roster
            .school(school)
            .map(|s| s.full_name())
            .unwrap_or_default()
    };

    let title = format!("{}, {}", runner, runner.gender());
    let mut lines = vec![if use_colors {
        title.bold().to_string()
    } else {
        title
    }];

    let affiliations = meet.roster.runner_affiliations(id);
    if affiliations.is_empty() {
        lines.push("Schools: unattached".to_string());
    } else {
        let schools = affiliations
            .iter()
            .map(|a| format!("{} {}", a.year(), school_name(a.school())))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Schools: {}", schools));
    }
    if let Some(last) = runner.last_school() {
        lines.push(format!("Last school: {}", school_name(last)));
    }
    lines.push(String::new());

    let history = meet.performances_of(id);
    if history.is_empty() {
        lines.push("No results.".to_string());
        return Some(lines.join("\n"));
    }

    let mut table = Table::new(&[
        ("Date", Align::Left),
        ("Meet", Align::Left),
        ("Distance", Align::Right),
        ("Time", Align::Right),
        ("Place", Align::Right),
        ("Points", Align::Right),
    ])
    .with_title("Performances");
    for (race, performance) in history {
        let place = race
            .results()
            .iter()
            .position(|p| std::ptr::eq(p, performance))
            .map(|i| (i + 1).to_string())
            .unwrap_or_default();
        table.push_row(vec![
            race.date().to_string(),
            race.meet().to_string(),
            format!("{} m", race.distance()),
            performance.time().to_string(),
            place,
            performance
                .points()
                .map(|p| p.to_string())
                .unwrap_or_default(),
        ]);
    }
    lines.extend(table.render(use_colors));
    Some(lines.join("\n"))
}

/// A school's men's and women's teams for one season. `None` if the school
/// is unknown.
pub fn format_team(meet: &Meet, school: SchoolId, year: i32, use_colors: bool) -> Option<String> {
    let name = meet.roster.school(school)?.full_name();
    let title = format!("{}, {}", name, year);
    let mut lines = vec![if use_colors {
        title.bold().to_string()
    } else {
        title
    }];

    let mut any = false;
    for gender in [Gender::Male, Gender::Female] {
        let team = meet.roster.team(school, year, gender);
        if team.is_empty() {
            continue;
        }
        any = true;
        let mut table = Table::new(&[("Name", Align::Left), ("Year", Align::Left)])
            .with_title(gender.team_label());
        for runner in team.iter().filter_map(|id| meet.roster.runner(*id)) {
            table.push_row(vec![
                runner.name(),
                runner.year().map(|y| y.to_string()).unwrap_or_default(),
            ]);
        }
        lines.push(String::new());
        lines.extend(table.render(use_colors));
    }

    if !any {
        lines.push(format!("No runners for {}.", year));
    }
    Some(lines.join("\n"))
}
