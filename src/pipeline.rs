use crate::player::PlayerRecord;
use crate::position::{normalize_position, PositionGroup};
use crate::scoring::{score_player, LegendScore, PeerDistributions, ScoreError, ScoringModel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error, info, warn};

/// Provenance tag for rule-derived scores (manual curation uses tier 1).
pub const SOURCE_TIER_RULES: u8 = 2;

pub const DEFAULT_MIN_POSITION_PLAYERS: usize = 3;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Groups smaller than this are skipped entirely
    pub min_position_players: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            min_position_players: DEFAULT_MIN_POSITION_PLAYERS,
        }
    }
}

/// One row of the legend score table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendRow {
    pub player_id: String,
    pub full_name: String,
    pub position: String,
    pub legend_score: f64,
    pub source_tier: u8,
}

#[derive(Debug, Clone)]
pub struct ScoredPlayer {
    pub row: LegendRow,
    pub detail: LegendScore,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerFailure {
    pub player_id: String,
    pub full_name: String,
    pub position: String,
    pub error: ScoreError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub position: String,
    pub players: usize,
    pub scored: bool,
}

#[derive(Debug, Default)]
pub struct PipelineOutcome {
    pub scored: Vec<ScoredPlayer>,
    pub groups: Vec<GroupSummary>,
    pub failures: Vec<PlayerFailure>,
    /// Players scored with the fallback weight table
    pub fallback_scored: usize,
    /// Players with no position label at all
    pub unlabeled: usize,
}

impl PipelineOutcome {
    /// True when no player received a legend score.
    pub fn is_empty(&self) -> bool {
        self.scored.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &LegendRow> + '_ {
        self.scored.iter().map(|s| &s.row)
    }

    pub fn skipped_groups(&self) -> impl Iterator<Item = &GroupSummary> + '_ {
        self.groups.iter().filter(|g| !g.scored)
    }

    pub fn find(&self, player_id: &str) -> Option<&ScoredPlayer> {
        self.scored.iter().find(|s| s.row.player_id == player_id)
    }
}

/// Keep players with at least `min_games` career games. Zero keeps everyone.
pub fn filter_eligible(players: Vec<PlayerRecord>, min_games: u32) -> Vec<PlayerRecord> {
    if min_games == 0 {
        return players;
    }
    let threshold = f64::from(min_games);
    players
        .into_iter()
        .filter(|p| p.total_career_games.is_some_and(|g| g >= threshold))
        .collect()
}

/// Group players by normalized position, in a stable order. Returns the
/// groups and the number of players that had no position label.
pub fn group_by_position(
    players: &[PlayerRecord],
) -> (BTreeMap<PositionGroup, Vec<&PlayerRecord>>, usize) {
    let mut groups: BTreeMap<PositionGroup, Vec<&PlayerRecord>> = BTreeMap::new();
    let mut unlabeled = 0;
    for player in players {
        match normalize_position(player.primary_pos.as_deref()) {
            Some(group) => groups.entry(group).or_default().push(player),
            None => unlabeled += 1,
        }
    }
    (groups, unlabeled)
}

/// Per-group sizes and whether each group clears the size threshold.
pub fn plan_groups(players: &[PlayerRecord], options: &PipelineOptions) -> Vec<GroupSummary> {
    let (groups, _) = group_by_position(players);
    groups
        .iter()
        .map(|(group, members)| GroupSummary {
            position: group.to_string(),
            players: members.len(),
            scored: members.len() >= options.min_position_players,
        })
        .collect()
}

/// Score every player against the peers sharing their position.
///
/// A group is ranked only against itself, so scores from different runs are
/// comparable only when the input snapshot is the same.
pub fn process_players(
    players: &[PlayerRecord],
    options: &PipelineOptions,
    model: &ScoringModel,
) -> PipelineOutcome {
    let (groups, unlabeled) = group_by_position(players);
    let mut outcome = PipelineOutcome {
        unlabeled,
        ..PipelineOutcome::default()
    };
    if unlabeled > 0 {
        warn!("Excluding {} players with no position", unlabeled);
    }

    for (group, members) in &groups {
        let label = group.to_string();

        if members.len() < options.min_position_players {
            warn!("Skipping {} - only {} players", label, members.len());
            outcome.groups.push(GroupSummary {
                position: label,
                players: members.len(),
                scored: false,
            });
            continue;
        }

        info!("Processing {} players...", label);
        let lookup = model.weights_for(group);
        if lookup.used_fallback {
            warn!(
                "No weight table for {}, scoring {} players with {} weights",
                label,
                members.len(),
                lookup.source
            );
        }

        // Distributions are fixed before any member is scored
        let peers = PeerDistributions::from_members(members, model.undrafted_pick());

        for player in members {
            match score_player(player, group, &peers, model) {
                Ok(detail) => {
                    if detail.used_fallback {
                        outcome.fallback_scored += 1;
                    }
                    outcome.scored.push(ScoredPlayer {
                        row: LegendRow {
                            player_id: player.player_id.clone(),
                            full_name: player.full_name.clone(),
                            position: label.clone(),
                            legend_score: round2(detail.score),
                            source_tier: SOURCE_TIER_RULES,
                        },
                        detail,
                    });
                }
                Err(e) => {
                    error!(
                        "Error processing {} ({}): {}",
                        player.player_id, player.full_name, e
                    );
                    outcome.failures.push(PlayerFailure {
                        player_id: player.player_id.clone(),
                        full_name: player.full_name.clone(),
                        position: label.clone(),
                        error: e,
                    });
                }
            }
        }

        debug!("{}: {} players in peer group", label, members.len());
        outcome.groups.push(GroupSummary {
            position: label,
            players: members.len(),
            scored: true,
        });
    }

    outcome
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
