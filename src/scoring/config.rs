use super::weights::{
    default_weight_tables, WeightTable, DEFAULT_FALLBACK_POSITION, DEFAULT_UNDRAFTED_PICK,
    DEFAULT_UNDRAFTED_SCORE,
};
use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Legend scoring configuration.
///
/// Every field is optional; omitted fields use the built-in values.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   fallback_position: LB
///   undrafted_pick: 999
///   undrafted_score: 10
///   weights:
///     K:
///       pro_bowls: 0.4
///       all_pros: 0.4
///       hof_flag: 0.2
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Position whose weights score groups that have no table (default: LB)
    #[serde(default)]
    pub fallback_position: Option<Position>,

    /// Draft pick value that marks an undrafted player (default: 999)
    #[serde(default)]
    pub undrafted_pick: Option<f64>,

    /// Fixed draft_pick score for undrafted players (default: 10)
    #[serde(default)]
    pub undrafted_score: Option<f64>,

    /// Per-position weight tables. A listed position replaces its whole
    /// built-in table.
    #[serde(default)]
    pub weights: Option<BTreeMap<Position, WeightTable>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            fallback_position: Some(DEFAULT_FALLBACK_POSITION),
            undrafted_pick: Some(DEFAULT_UNDRAFTED_PICK),
            undrafted_score: Some(DEFAULT_UNDRAFTED_SCORE),
            weights: Some(default_weight_tables()),
        }
    }
}
