use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_TAKE_ALL_RATIO: f64 = 0.5;

/// Target number of candidates per position.
pub fn default_quotas() -> BTreeMap<Position, usize> {
    BTreeMap::from([
        (Position::QB, 200),
        (Position::RB, 450),
        (Position::WR, 600),
        (Position::TE, 250),
        (Position::OL, 800),
        (Position::DL, 600),
        (Position::LB, 450),
        (Position::DB, 700),
        (Position::K, 120),
        (Position::P, 60),
    ])
}

/// Multipliers and caps for the candidate quality score.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct QualityWeights {
    pub hall_of_fame: f64,
    pub all_pro: f64,
    pub pro_bowl: f64,
    pub season: f64,
    pub games_divisor: f64,
    pub games_cap: f64,

    pub passing_yards_divisor: f64,
    pub passing_yards_cap: f64,
    pub passer_td: f64,

    pub rushing_yards_divisor: f64,
    pub rushing_yards_cap: f64,
    pub rusher_td: f64,

    pub receiving_yards_divisor: f64,
    pub receiving_yards_cap: f64,
    pub receiver_td: f64,

    pub tackles_divisor: f64,
    pub tackles_cap: f64,
    pub sack: f64,
    pub interception: f64,

    /// Extra per-season credit for kickers and punters
    pub specialist_season: f64,
    pub playoff_bonus: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            hall_of_fame: 100.0,
            all_pro: 10.0,
            pro_bowl: 3.0,
            season: 1.0,
            games_divisor: 10.0,
            games_cap: 20.0,
            passing_yards_divisor: 1000.0,
            passing_yards_cap: 50.0,
            passer_td: 0.5,
            rushing_yards_divisor: 500.0,
            rushing_yards_cap: 40.0,
            rusher_td: 0.8,
            receiving_yards_divisor: 500.0,
            receiving_yards_cap: 40.0,
            receiver_td: 0.8,
            tackles_divisor: 50.0,
            tackles_cap: 30.0,
            sack: 2.0,
            interception: 3.0,
            specialist_season: 2.0,
            playoff_bonus: 0.5,
        }
    }
}

impl QualityWeights {
    fn divisors(&self) -> [(&'static str, f64); 5] {
        [
            ("games_divisor", self.games_divisor),
            ("passing_yards_divisor", self.passing_yards_divisor),
            ("rushing_yards_divisor", self.rushing_yards_divisor),
            ("receiving_yards_divisor", self.receiving_yards_divisor),
            ("tackles_divisor", self.tackles_divisor),
        ]
    }
}

/// Candidate selection configuration.
///
/// Example YAML:
/// ```yaml
/// selection:
///   take_all_ratio: 0.5
///   quotas:
///     QB: 250
///     P: 40
///   quality:
///     hall_of_fame: 150
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SelectionConfig {
    /// Per-position quota overrides, merged over the built-in quotas
    #[serde(default)]
    pub quotas: Option<BTreeMap<Position, usize>>,

    /// Positions at or below `quota * take_all_ratio` players keep everyone
    #[serde(default)]
    pub take_all_ratio: Option<f64>,

    #[serde(default)]
    pub quality: Option<QualityWeights>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            quotas: Some(default_quotas()),
            take_all_ratio: Some(DEFAULT_TAKE_ALL_RATIO),
            quality: Some(QualityWeights::default()),
        }
    }
}

/// Resolved selection settings with every default filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRules {
    pub quotas: BTreeMap<Position, usize>,
    pub take_all_ratio: f64,
    pub quality: QualityWeights,
}

impl Default for SelectionRules {
    fn default() -> Self {
        Self::from_config(&SelectionConfig::default())
    }
}

impl SelectionRules {
    pub fn from_config(config: &SelectionConfig) -> Self {
        let mut quotas = default_quotas();
        if let Some(ref overrides) = config.quotas {
            quotas.extend(overrides.iter().map(|(p, q)| (*p, *q)));
        }
        Self {
            quotas,
            take_all_ratio: config.take_all_ratio.unwrap_or(DEFAULT_TAKE_ALL_RATIO),
            quality: config.quality.clone().unwrap_or_default(),
        }
    }
}

/// Validate selection configuration, collecting every error.
pub fn validate_selection(config: &SelectionConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ratio) = config.take_all_ratio {
        if !(0.0..=1.0).contains(&ratio) {
            errors.push(format!(
                "selection.take_all_ratio: must be between 0 and 1, got {}",
                ratio
            ));
        }
    }

    if let Some(ref quality) = config.quality {
        for (name, divisor) in quality.divisors() {
            if !(divisor.is_finite() && divisor > 0.0) {
                errors.push(format!(
                    "selection.quality.{}: must be a positive number, got {}",
                    name, divisor
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
