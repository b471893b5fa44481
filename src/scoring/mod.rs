pub mod attributes;
pub mod config;
pub mod engine;
pub mod percentile;
pub mod validation;
pub mod weights;

pub use attributes::{Attribute, AttributeKind};
pub use config::*;
pub use engine::{
    calculate_attribute_scores, calculate_legend_score, score_player, AttributeScores,
    Contribution, LegendScore, ScoreError,
};
pub use percentile::{
    flag_score, group_percentile_score, percentile_score, PeerDistributions, NEUTRAL_SCORE,
};
pub use validation::validate_scoring;
pub use weights::{default_weight_tables, ScoringModel, WeightLookup, WeightTable};
