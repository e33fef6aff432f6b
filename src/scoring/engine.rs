use std::collections::HashMap;

use tracing::{debug, trace};

use super::config::ScoringRules;
use super::team_score::TeamScore;
use super::validation::validate_rules;
use crate::model::{Directory, ModelError, Race, SchoolId};

/// A school's finishers while the race is being scored, as indices into the
/// race results in finish order.
struct Entry {
    school: SchoolId,
    members: Vec<usize>,
}

/// Assign points to every result of `race` and rank its teams.
///
/// Eligibility and places are worked out in local buffers first; results and
/// team scores are only written once everything has been resolved, so a
/// failed call leaves the race as it was.
///
/// Places are handed out one per eligible finisher. A finisher whose time
/// equals the previous eligible finisher's shares that finisher's points, but
/// the counter still advances: if places 3 and 4 tie, both get 3 and the next
/// finisher gets 5.
pub fn score_race<D: Directory + ?Sized>(
    race: &mut Race,
    directory: &D,
    rules: &ScoringRules,
) -> Result<(), ModelError> {
    if let Err(errors) = validate_rules(rules) {
        return Err(ModelError::invalid(errors.join("; ")));
    }
    if let Some(stray) = race.results.iter().find(|p| p.race() != race.id()) {
        return Err(ModelError::inconsistent(format!(
            "{} holds a result from {}",
            race.id(),
            stray.race()
        )));
    }

    let results = &race.results;

    // Group finishers by school, in finish order.
    let mut eligible = vec![false; results.len()];
    let mut entries: Vec<Entry> = Vec::new();
    let mut by_school: HashMap<SchoolId, usize> = HashMap::new();
    for (i, performance) in results.iter().enumerate() {
        if directory.runner(performance.runner()).is_none() {
            return Err(ModelError::inconsistent(format!(
                "{} holds a result for {}, which does not exist",
                race.id(),
                performance.runner()
            )));
        }
        let Some(school) = performance.school(directory) else {
            continue;
        };
        if directory.school(school).is_none() {
            return Err(ModelError::inconsistent(format!(
                "runner {} is affiliated with {}, which does not exist",
                performance.runner(),
                school
            )));
        }
        let slot = *by_school.entry(school).or_insert_with(|| {
            entries.push(Entry {
                school,
                members: Vec::new(),
            });
            entries.len() - 1
        });
        entries[slot].members.push(i);
        eligible[i] = true;
    }

    // Short teams do not score; past the cap nobody scores.
    for entry in &entries {
        let gated = if entry.members.len() < rules.team_size {
            &entry.members[..]
        } else {
            &entry.members[entry.members.len().min(rules.max_runners)..]
        };
        for &i in gated {
            eligible[i] = false;
        }
        trace!(
            school = %entry.school,
            finishers = entry.members.len(),
            gated = gated.len(),
            "team gated"
        );
    }

    // Places in finish order over eligible runners only.
    let mut points: Vec<Option<u32>> = vec![None; results.len()];
    let mut place: u32 = 1;
    let mut previous: Option<usize> = None;
    for i in (0..results.len()).filter(|&i| eligible[i]) {
        points[i] = match previous {
            Some(p) if results[p].time() == results[i].time() => points[p],
            _ => Some(place),
        };
        place += 1;
        previous = Some(i);
    }

    // Publish.
    for (performance, awarded) in race.results.iter_mut().zip(points) {
        performance.set_points(awarded);
    }
    let mut scores: Vec<TeamScore> = entries
        .into_iter()
        .map(|entry| {
            let runners = entry.members.iter().map(|&i| race.results[i]).collect();
            TeamScore::new(entry.school, runners, *rules)
        })
        .collect();
    scores.sort_by(|a, b| a.compare(b, directory));

    debug!(
        race = %race.id(),
        results = race.results.len(),
        teams = scores.len(),
        scored_teams = scores.iter().filter(|s| s.score().is_some()).count(),
        "scored race"
    );
    race.scores = scores;
    race.scored = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Performance, RaceId, Roster, Runner, RunnerId, School, Time, Venue};
    use chrono::NaiveDate;

    const YEAR: i32 = 2009;

    struct Meet {
        roster: Roster,
        race: Race,
        schools: Vec<SchoolId>,
    }

    impl Meet {
        fn new(school_names: &[&str]) -> Self {
            let mut roster = Roster::new();
            let schools = school_names
                .iter()
                .map(|name| {
                    roster
                        .add_school(School::new(name, "College", true, Some("NWC")).unwrap())
                        .unwrap()
                })
                .collect();
            let race = Race::new(
                RaceId::new(1),
                "NWC Championships",
                NaiveDate::from_ymd_opt(YEAR, 10, 31).unwrap(),
                Gender::Male,
                8000,
                Venue::new("Bush Park", "Salem", "OR"),
            )
            .unwrap();
            Self {
                roster,
                race,
                schools,
            }
        }

        /// Add a finisher for school `team` (index into `schools`, or `None`
        /// for an unattached runner).
        fn finish(&mut self, team: Option<usize>, seconds: f64) -> RunnerId {
            let n = self.roster.runners().count();
            let runner = self
                .roster
                .add_runner(Runner::new(&format!("Runner{:03}", n), "Test", Gender::Male, None).unwrap())
                .unwrap();
            if let Some(t) = team {
                self.roster.affiliate(runner, self.schools[t], YEAR).unwrap();
            }
            let perf = Performance::new(runner, &self.race, Time::from_seconds(seconds).unwrap());
            self.race.add_result(perf).unwrap();
            runner
        }

        fn score(&mut self) {
            self.race.score(&self.roster).unwrap();
        }

        fn points_of(&self, runner: RunnerId) -> Option<u32> {
            self.race
                .results()
                .iter()
                .find(|p| p.runner() == runner)
                .unwrap()
                .points()
        }

        fn team(&self, t: usize) -> &TeamScore {
            self.race
                .scores()
                .iter()
                .find(|s| s.school() == self.schools[t])
                .unwrap()
        }
    }

    #[test]
    fn test_empty_race() {
        let mut meet = Meet::new(&["Linfield"]);
        meet.score();
        assert!(meet.race.scores().is_empty());
        assert!(meet.race.is_scored());
    }

    #[test]
    fn test_three_school_scenario() {
        let mut meet = Meet::new(&["Alpha", "Bravo", "Charlie"]);
        // Overall order: A A A B B B B B A A C C C
        let layout = [0, 0, 0, 1, 1, 1, 1, 1, 0, 0, 2, 2, 2];
        let runners: Vec<RunnerId> = layout
            .iter()
            .enumerate()
            .map(|(place, &t)| meet.finish(Some(t), 1500.0 + place as f64))
            .collect();
        meet.score();

        let points: Vec<Option<u32>> = runners.iter().map(|r| meet.points_of(*r)).collect();
        let mut expected: Vec<Option<u32>> = (1..=10).map(Some).collect();
        expected.extend([None, None, None]);
        assert_eq!(points, expected);

        assert_eq!(meet.team(0).score(), Some(25));
        assert_eq!(meet.team(1).score(), Some(30));
        assert_eq!(meet.team(2).score(), None);

        let order: Vec<SchoolId> = meet.race.scores().iter().map(|s| s.school()).collect();
        assert_eq!(order, meet.schools);
    }

    #[test]
    fn test_four_finishers_do_not_score() {
        let mut meet = Meet::new(&["Alpha", "Bravo"]);
        let four: Vec<RunnerId> = (0..4).map(|i| meet.finish(Some(0), 1500.0 + i as f64)).collect();
        let five: Vec<RunnerId> = (0..5).map(|i| meet.finish(Some(1), 1510.0 + i as f64)).collect();
        meet.score();

        assert!(four.iter().all(|r| meet.points_of(*r).is_none()));
        assert_eq!(meet.team(0).score(), None);

        let points: Vec<Option<u32>> = five.iter().map(|r| meet.points_of(*r)).collect();
        assert_eq!(points, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
        assert_eq!(meet.team(1).score(), Some(15));
    }

    #[test]
    fn test_eighth_and_ninth_runners_never_score() {
        let mut meet = Meet::new(&["Alpha"]);
        let runners: Vec<RunnerId> = (0..9).map(|i| meet.finish(Some(0), 1500.0 + i as f64)).collect();
        meet.score();

        for (i, r) in runners.iter().enumerate() {
            if i < 7 {
                assert_eq!(meet.points_of(*r), Some(i as u32 + 1));
            } else {
                assert_eq!(meet.points_of(*r), None);
            }
        }
        assert_eq!(meet.team(0).runners().len(), 9);
    }

    #[test]
    fn test_capped_runners_do_not_take_places() {
        let mut meet = Meet::new(&["Alpha", "Bravo"]);
        for i in 0..8 {
            meet.finish(Some(0), 1500.0 + i as f64);
        }
        let bravo: Vec<RunnerId> = (0..5).map(|i| meet.finish(Some(1), 1600.0 + i as f64)).collect();
        meet.score();

        // Alpha's 8th runner is skipped, so Bravo starts at 8.
        assert_eq!(meet.points_of(bravo[0]), Some(8));
        assert_eq!(meet.team(1).score(), Some(8 + 9 + 10 + 11 + 12));
    }

    #[test]
    fn test_ties_share_points_and_skip() {
        let mut meet = Meet::new(&["Alpha", "Bravo"]);
        let a: Vec<RunnerId> = [1500.0, 1501.0, 1502.0, 1510.0, 1511.0]
            .iter()
            .map(|s| meet.finish(Some(0), *s))
            .collect();
        // Bravo's first runner ties Alpha's third.
        let b: Vec<RunnerId> = [1502.0, 1503.0, 1520.0, 1521.0, 1522.0]
            .iter()
            .map(|s| meet.finish(Some(1), *s))
            .collect();
        meet.score();

        assert_eq!(meet.points_of(a[2]), Some(3));
        assert_eq!(meet.points_of(b[0]), Some(3));
        assert_eq!(meet.points_of(b[1]), Some(5));
    }

    #[test]
    fn test_unattached_runners_are_skipped() {
        let mut meet = Meet::new(&["Alpha"]);
        let loner = meet.finish(None, 1400.0);
        let team: Vec<RunnerId> = (0..5).map(|i| meet.finish(Some(0), 1500.0 + i as f64)).collect();
        meet.score();

        assert_eq!(meet.points_of(loner), None);
        assert_eq!(meet.points_of(team[0]), Some(1));
        assert_eq!(meet.race.scores().len(), 1);
    }

    #[test]
    fn test_tie_with_ineligible_runner_does_not_share() {
        let mut meet = Meet::new(&["Alpha", "Bravo"]);
        // Bravo fields only one runner, who ties Alpha's first.
        let short = meet.finish(Some(1), 1500.0);
        let team: Vec<RunnerId> = (0..5).map(|i| meet.finish(Some(0), 1500.0 + i as f64)).collect();
        meet.score();

        assert_eq!(meet.points_of(short), None);
        assert_eq!(meet.points_of(team[0]), Some(1));
        assert_eq!(meet.points_of(team[1]), Some(2));
    }

    #[test]
    fn test_no_full_team() {
        let mut meet = Meet::new(&["Alpha", "Bravo"]);
        for i in 0..3 {
            meet.finish(Some(0), 1500.0 + i as f64);
            meet.finish(Some(1), 1550.0 + i as f64);
        }
        meet.score();

        assert_eq!(meet.race.scores().len(), 2);
        assert!(meet.race.scores().iter().all(|s| s.score().is_none()));
        assert!(meet.race.results().iter().all(|p| p.points().is_none()));
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let mut meet = Meet::new(&["Alpha", "Bravo", "Charlie"]);
        for i in 0..20 {
            meet.finish(Some(i % 3), 1500.0 + (i / 2) as f64);
        }
        meet.score();
        let first: Vec<Option<u32>> = meet.race.results().iter().map(|p| p.points()).collect();
        let first_order: Vec<SchoolId> = meet.race.scores().iter().map(|s| s.school()).collect();

        meet.score();
        let second: Vec<Option<u32>> = meet.race.results().iter().map(|p| p.points()).collect();
        let second_order: Vec<SchoolId> = meet.race.scores().iter().map(|s| s.school()).collect();

        assert_eq!(first, second);
        assert_eq!(first_order, second_order);
    }

    #[test]
    fn test_add_result_marks_race_unscored() {
        let mut meet = Meet::new(&["Alpha"]);
        meet.finish(Some(0), 1500.0);
        meet.score();
        assert!(meet.race.is_scored());
        meet.finish(Some(0), 1501.0);
        assert!(!meet.race.is_scored());
    }

    #[test]
    fn test_custom_rules() {
        let mut meet = Meet::new(&["Alpha", "Bravo"]);
        let a: Vec<RunnerId> = (0..4).map(|i| meet.finish(Some(0), 1500.0 + i as f64)).collect();
        (0..3).for_each(|i| {
            meet.finish(Some(1), 1600.0 + i as f64);
        });
        let rules = ScoringRules {
            team_size: 3,
            max_runners: 3,
        };
        meet.race.score_with(&meet.roster, &rules).unwrap();

        assert_eq!(meet.points_of(a[3]), None);
        assert_eq!(meet.team(0).score(), Some(6));
        assert_eq!(meet.team(1).score(), Some(4 + 5 + 6));
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let mut meet = Meet::new(&["Alpha"]);
        let rules = ScoringRules {
            team_size: 0,
            max_runners: 0,
        };
        let err = meet.race.score_with(&meet.roster, &rules).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArgument(_)));
        assert!(!meet.race.is_scored());
    }

    /// Knows every runner but points them all at a school that is missing.
    struct BrokenDirectory<'a>(&'a Roster);

    impl Directory for BrokenDirectory<'_> {
        fn school_of(&self, _runner: RunnerId, _year: i32) -> Option<SchoolId> {
            Some(SchoolId(42))
        }

        fn runner(&self, id: RunnerId) -> Option<&Runner> {
            self.0.runner(id)
        }

        fn school(&self, _id: SchoolId) -> Option<&School> {
            None
        }
    }

    #[test]
    fn test_unresolvable_school_is_inconsistent() {
        let mut meet = Meet::new(&["Alpha"]);
        let runner = meet.finish(Some(0), 1500.0);
        meet.score();
        let before = meet.points_of(runner);

        let roster = meet.roster.clone();
        let err = meet.race.score(&BrokenDirectory(&roster)).unwrap_err();
        assert!(matches!(err, ModelError::ConsistencyViolation(_)));
        assert_eq!(meet.points_of(runner), before);
    }

    #[test]
    fn test_unknown_runner_is_inconsistent() {
        let mut meet = Meet::new(&["Alpha"]);
        let known = meet.finish(Some(0), 1500.0);
        meet.score();
        let before = meet.points_of(known);

        let stranger = Performance::new(RunnerId(999), &meet.race, Time::from_seconds(1490.0).unwrap());
        meet.race.add_result(stranger).unwrap();

        let err = meet.race.score(&meet.roster).unwrap_err();
        assert!(matches!(err, ModelError::ConsistencyViolation(_)));
        assert!(err.to_string().contains("runner#999"));
        assert!(!meet.race.is_scored());
        assert_eq!(meet.points_of(known), before);
        assert_eq!(meet.race.scores().len(), 1);
    }
}
