use super::config::ScoringRules;

/// Validate scoring rules at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_rules(rules: &ScoringRules) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if rules.team_size == 0 {
        errors.push("scoring.team_size: must be at least 1".to_string());
    }

    if rules.max_runners < rules.team_size {
        errors.push(format!(
            "scoring.max_runners: must be at least team_size ({}), got {}",
            rules.team_size, rules.max_runners
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
