use super::attributes::{Attribute, AttributeKind};
use super::percentile::{flag_score, percentile_score, PeerDistributions, NEUTRAL_SCORE};
use super::weights::ScoringModel;
use crate::player::{present, PlayerRecord};
use crate::position::{Position, PositionGroup};
use std::collections::HashMap;

/// Percentile score per attribute for one player.
pub type AttributeScores = HashMap<Attribute, f64>;

/// Why a single player could not be scored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreError {
    #[error("player has no player_id")]
    MissingId,

    #[error("{attribute} is not a finite number ({value})")]
    NonFinite { attribute: Attribute, value: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub attribute: Attribute,
    pub score: f64,
    pub weight: f64,
    /// True when the player had no score and the neutral value stood in
    pub imputed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendScore {
    pub score: f64,
    /// Position whose weight table produced the score
    pub weights_from: Position,
    pub used_fallback: bool,
    pub breakdown: Vec<Contribution>,
}

/// Score every attribute the player can be ranked on within their group.
///
/// Percentile attributes are only scored when the player has a value. Draft
/// position and honors are always scored.
pub fn calculate_attribute_scores(
    player: &PlayerRecord,
    peers: &PeerDistributions,
    model: &ScoringModel,
) -> Result<AttributeScores, ScoreError> {
    let mut scores = AttributeScores::new();

    for attribute in Attribute::ALL {
        let value = present(attribute.raw_value(player));
        if let Some(v) = value {
            if !v.is_finite() {
                return Err(ScoreError::NonFinite {
                    attribute,
                    value: v,
                });
            }
        }

        let score = match attribute.kind() {
            AttributeKind::Flag => flag_score(player.hof_flag),
            AttributeKind::DraftPosition => match value {
                // Ranked among drafted peers only
                Some(pick) if pick != model.undrafted_pick() => {
                    percentile_score(Some(pick), peers.values(attribute), false)
                }
                _ => model.undrafted_score(),
            },
            AttributeKind::Percentile { higher_is_better } => {
                if value.is_none() && !attribute.always_scored() {
                    continue;
                }
                peers.score(attribute, value, higher_is_better)
            }
        };
        scores.insert(attribute, score);
    }

    Ok(scores)
}

/// Weighted average of attribute scores under the position's weight table.
///
/// Attributes the table weights but the player lacks count as
/// [`NEUTRAL_SCORE`]. The average divides by the weights actually summed,
/// so tables need not total 1.0.
pub fn calculate_legend_score(
    scores: &AttributeScores,
    position: &PositionGroup,
    model: &ScoringModel,
) -> LegendScore {
    let lookup = model.weights_for(position);
    let mut total_score = 0.0;
    let mut total_weight = 0.0;
    let mut breakdown = Vec::with_capacity(lookup.table.len());

    for (attribute, weight) in lookup.table.iter() {
        let (score, imputed) = match scores.get(&attribute) {
            Some(score) => (*score, false),
            None => (NEUTRAL_SCORE, true),
        };
        total_score += score * weight;
        total_weight += weight;
        breakdown.push(Contribution {
            attribute,
            score,
            weight,
            imputed,
        });
    }

    let score = if total_weight == 0.0 {
        NEUTRAL_SCORE
    } else {
        total_score / total_weight
    };

    LegendScore {
        score,
        weights_from: lookup.source,
        used_fallback: lookup.used_fallback,
        breakdown,
    }
}

/// Score one member of a peer group.
pub fn score_player(
    player: &PlayerRecord,
    position: &PositionGroup,
    peers: &PeerDistributions,
    model: &ScoringModel,
) -> Result<LegendScore, ScoreError> {
    if player.player_id.trim().is_empty() {
        return Err(ScoreError::MissingId);
    }
    let scores = calculate_attribute_scores(player, peers, model)?;
    Ok(calculate_legend_score(&scores, position, model))
}
