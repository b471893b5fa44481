use super::attributes::Attribute;
use super::config::ScoringConfig;
use crate::position::{Position, PositionGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute weights for one position.
///
/// Weights are relative; they do not need to sum to 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable(BTreeMap<Attribute, f64>);

static EMPTY_TABLE: WeightTable = WeightTable(BTreeMap::new());

impl WeightTable {
    pub fn from_pairs(pairs: &[(Attribute, f64)]) -> Self {
        Self(pairs.iter().copied().collect())
    }

    pub fn get(&self, attribute: Attribute) -> Option<f64> {
        self.0.get(&attribute).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        self.0.iter().map(|(a, w)| (*a, *w))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of looking up the weights for a position group.
#[derive(Debug, Clone, Copy)]
pub struct WeightLookup<'a> {
    pub table: &'a WeightTable,
    /// Position whose table was used
    pub source: Position,
    /// True when the group had no table of its own
    pub used_fallback: bool,
}

/// The immutable scoring configuration: one weight table per canonical
/// position plus the draft-pick policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringModel {
    tables: BTreeMap<Position, WeightTable>,
    fallback: Position,
    undrafted_pick: f64,
    undrafted_score: f64,
}

pub const DEFAULT_FALLBACK_POSITION: Position = Position::LB;
pub const DEFAULT_UNDRAFTED_PICK: f64 = 999.0;
pub const DEFAULT_UNDRAFTED_SCORE: f64 = 10.0;

impl Default for ScoringModel {
    fn default() -> Self {
        Self {
            tables: default_weight_tables(),
            fallback: DEFAULT_FALLBACK_POSITION,
            undrafted_pick: DEFAULT_UNDRAFTED_PICK,
            undrafted_score: DEFAULT_UNDRAFTED_SCORE,
        }
    }
}

impl ScoringModel {
    pub fn new(
        tables: BTreeMap<Position, WeightTable>,
        fallback: Position,
        undrafted_pick: f64,
        undrafted_score: f64,
    ) -> Self {
        Self {
            tables,
            fallback,
            undrafted_pick,
            undrafted_score,
        }
    }

    /// Build the model from config. Positions listed under `weights`
    /// replace the built-in table for that position; the rest keep theirs.
    pub fn from_config(config: &ScoringConfig) -> Self {
        let mut tables = default_weight_tables();
        if let Some(ref overrides) = config.weights {
            for (position, table) in overrides {
                tables.insert(*position, table.clone());
            }
        }
        Self {
            tables,
            fallback: config.fallback_position.unwrap_or(DEFAULT_FALLBACK_POSITION),
            undrafted_pick: config.undrafted_pick.unwrap_or(DEFAULT_UNDRAFTED_PICK),
            undrafted_score: config.undrafted_score.unwrap_or(DEFAULT_UNDRAFTED_SCORE),
        }
    }

    pub fn table(&self, position: Position) -> Option<&WeightTable> {
        self.tables.get(&position)
    }

    pub fn tables(&self) -> &BTreeMap<Position, WeightTable> {
        &self.tables
    }

    pub fn fallback_position(&self) -> Position {
        self.fallback
    }

    pub fn undrafted_pick(&self) -> f64 {
        self.undrafted_pick
    }

    pub fn undrafted_score(&self) -> f64 {
        self.undrafted_score
    }

    /// Weights for a group, falling back to the default position's table
    /// for groups without one. If even that is missing the table is empty,
    /// which aggregates to the neutral score.
    pub fn weights_for(&self, group: &PositionGroup) -> WeightLookup<'_> {
        if let Some(position) = group.canonical() {
            if let Some(table) = self.tables.get(&position) {
                return WeightLookup {
                    table,
                    source: position,
                    used_fallback: false,
                };
            }
        }
        WeightLookup {
            table: self.tables.get(&self.fallback).unwrap_or(&EMPTY_TABLE),
            source: self.fallback,
            used_fallback: true,
        }
    }
}

/// Built-in weight tables, tuned so honors and playoff production dominate
/// for skill positions and size dominates for linemen.
pub fn default_weight_tables() -> BTreeMap<Position, WeightTable> {
    use Attribute::*;

    let specialist = WeightTable::from_pairs(&[
        (Height, 0.05),
        (Weight, 0.05),
        (DraftPick, 0.20),
        (ProBowls, 0.30),
        (AllPros, 0.30),
        (HofFlag, 0.10),
    ]);

    BTreeMap::from([
        (
            Position::QB,
            WeightTable::from_pairs(&[
                (Height, 0.01),
                (Weight, 0.01),
                (FortyTime, 0.01),
                (CareerPassingYards, 0.10),
                (CareerPassingTds, 0.12),
                (PlayoffPassingYards, 0.18),
                (PlayoffPassingTds, 0.35),
                (CareerSeasons, 0.05),
                (DraftPick, 0.02),
                (ProBowls, 0.08),
                (AllPros, 0.12),
                (HofFlag, 0.09),
            ]),
        ),
        (
            Position::RB,
            WeightTable::from_pairs(&[
                (Height, 0.03),
                (Weight, 0.08),
                (FortyTime, 0.15),
                (CareerRushingYards, 0.25),
                (CareerRushingTds, 0.20),
                (CareerReceivingYards, 0.10),
                (CareerReceivingTds, 0.05),
                (PlayoffRushingYards, 0.04),
                (CareerSeasons, 0.05),
                (DraftPick, 0.05),
                (ProBowls, 0.12),
                (AllPros, 0.15),
                (HofFlag, 0.06),
            ]),
        ),
        (
            Position::WR,
            WeightTable::from_pairs(&[
                (Height, 0.06),
                (Weight, 0.02),
                (FortyTime, 0.15),
                (VerticalJump, 0.06),
                (CareerReceivingYards, 0.25),
                (CareerReceivingTds, 0.20),
                (PlayoffReceivingYards, 0.06),
                (PlayoffReceivingTds, 0.04),
                (CareerSeasons, 0.05),
                (DraftPick, 0.06),
                (ProBowls, 0.12),
                (AllPros, 0.15),
                (HofFlag, 0.06),
            ]),
        ),
        (
            Position::TE,
            WeightTable::from_pairs(&[
                (Height, 0.15),
                (Weight, 0.12),
                (FortyTime, 0.10),
                (CareerReceivingYards, 0.20),
                (CareerReceivingTds, 0.15),
                (PlayoffReceivingYards, 0.05),
                (CareerSeasons, 0.05),
                (DraftPick, 0.08),
                (ProBowls, 0.12),
                (AllPros, 0.15),
                (HofFlag, 0.06),
            ]),
        ),
        (
            Position::OL,
            WeightTable::from_pairs(&[
                (Height, 0.20),
                (Weight, 0.20),
                (BenchPress, 0.12),
                (CareerSeasons, 0.15),
                (TotalCareerGames, 0.10),
                (DraftPick, 0.08),
                (ProBowls, 0.12),
                (AllPros, 0.15),
                (HofFlag, 0.08),
            ]),
        ),
        (
            Position::DL,
            WeightTable::from_pairs(&[
                (Height, 0.10),
                (Weight, 0.15),
                (FortyTime, 0.10),
                (BenchPress, 0.10),
                (DefSacks, 0.25),
                (DefSoloTackles, 0.15),
                (CareerSeasons, 0.05),
                (DraftPick, 0.06),
                (ProBowls, 0.12),
                (AllPros, 0.15),
                (HofFlag, 0.07),
            ]),
        ),
        (
            Position::LB,
            WeightTable::from_pairs(&[
                (Height, 0.08),
                (Weight, 0.12),
                (FortyTime, 0.15),
                (VerticalJump, 0.08),
                (DefSoloTackles, 0.25),
                (DefSacks, 0.15),
                (DefInts, 0.08),
                (CareerSeasons, 0.05),
                (DraftPick, 0.06),
                (ProBowls, 0.12),
                (AllPros, 0.15),
                (HofFlag, 0.06),
            ]),
        ),
        (
            Position::DB,
            WeightTable::from_pairs(&[
                (Height, 0.08),
                (Weight, 0.04),
                (FortyTime, 0.25),
                (VerticalJump, 0.12),
                (DefInts, 0.25),
                (DefSoloTackles, 0.12),
                (CareerSeasons, 0.05),
                (DraftPick, 0.06),
                (ProBowls, 0.12),
                (AllPros, 0.15),
                (HofFlag, 0.06),
            ]),
        ),
        (Position::K, specialist.clone()),
        (Position::P, specialist),
    ])
}
