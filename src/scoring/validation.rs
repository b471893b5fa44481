use super::config::ScoringConfig;
use super::weights::ScoringModel;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(pick) = config.undrafted_pick {
        if !pick.is_finite() {
            errors.push("scoring.undrafted_pick: must be a finite number".to_string());
        }
    }

    if let Some(score) = config.undrafted_score {
        if !(0.0..=100.0).contains(&score) {
            errors.push(format!(
                "scoring.undrafted_score: must be between 0 and 100, got {}",
                score
            ));
        }
    }

    if let Some(ref weights) = config.weights {
        for (position, table) in weights {
            for (attribute, weight) in table.iter() {
                if !weight.is_finite() {
                    errors.push(format!(
                        "scoring.weights.{}.{}: must be a finite number",
                        position, attribute
                    ));
                } else if weight < 0.0 {
                    errors.push(format!(
                        "scoring.weights.{}.{}: must be non-negative, got {}",
                        position, attribute, weight
                    ));
                }
            }
        }
    }

    // The fallback table must exist once overrides are merged in
    let model = ScoringModel::from_config(config);
    let fallback = model.fallback_position();
    if !model.table(fallback).is_some_and(|t| !t.is_empty()) {
        errors.push(format!(
            "scoring.fallback_position: {} has no weights to fall back on",
            fallback
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
