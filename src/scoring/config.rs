use serde::{Deserialize, Serialize};

/// How many runners count toward a team score, and how many may score at all.
///
/// A team's first `team_size` finishers are its scorers. Finishers
/// `team_size..max_runners` (0-based) still take places and break ties as
/// displacers; anyone after that never scores.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   team_size: 5
///   max_runners: 7
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringRules {
    /// Scorers per team (default: 5)
    pub team_size: usize,

    /// Scoring-eligible runners per team, displacers included (default: 7)
    pub max_runners: usize,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            team_size: 5,
            max_runners: 7,
        }
    }
}

impl ScoringRules {
    /// 0-based team positions whose points break ties between equal scores.
    pub fn displacers(&self) -> std::ops::Range<usize> {
        self.team_size..self.max_runners.max(self.team_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = ScoringRules::default();
        assert_eq!(rules.team_size, 5);
        assert_eq!(rules.max_runners, 7);
        assert_eq!(rules.displacers(), 5..7);
    }

    #[test]
    fn test_rules_serde_roundtrip() {
        let rules = ScoringRules::default();
        let yaml = serde_saphyr::to_string(&rules).unwrap();
        let parsed: ScoringRules = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(rules, parsed);
    }

    #[test]
    fn test_partial_rules_parse() {
        let yaml = "team_size: 4\n";
        let rules: ScoringRules = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(rules.team_size, 4);
        assert_eq!(rules.max_runners, 7);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "team_size: 5\nscorers: 9\n";
        let result: Result<ScoringRules, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
