use super::config::{QualityWeights, SelectionRules};
use super::era::Era;
use crate::player::{present, PlayerRecord};
use crate::position::{normalize_position, Position, PositionGroup};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// A player chosen for the candidate pool.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Record with its name cleaned, position normalized and era filled in
    pub player: PlayerRecord,
    pub position: Position,
    pub era: Era,
    pub quality: f64,
}

/// How one position's quota played out.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaOutcome {
    pub position: Position,
    pub available: usize,
    pub quota: usize,
    pub selected: usize,
    pub took_all: bool,
}

#[derive(Debug, Default)]
pub struct Selection {
    pub candidates: Vec<Candidate>,
    pub quotas: Vec<QuotaOutcome>,
    pub considered: usize,
    pub passed_filters: usize,
    /// Players that passed the filters but have no quota position
    pub unassigned: usize,
}

impl Selection {
    pub fn position_distribution(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for c in &self.candidates {
            *counts.entry(c.position.to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn era_distribution(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for c in &self.candidates {
            *counts.entry(c.era.to_string()).or_insert(0) += 1;
        }
        counts
    }
}

fn stat(value: Option<f64>) -> f64 {
    present(value).unwrap_or(0.0)
}

/// Standardize a display name: trimmed, title-cased, no periods after
/// initials or suffixes, single spaces.
pub fn clean_name(raw: &str) -> String {
    let mut titled = String::with_capacity(raw.len());
    let mut prev_alpha = false;
    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                titled.extend(c.to_lowercase());
            } else {
                titled.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            titled.push(c);
            prev_alpha = false;
        }
    }

    let words: Vec<String> = titled
        .split_whitespace()
        .map(|word| {
            let bare = word.trim_end_matches('.');
            if bare == "Jr" || bare == "Sr" {
                bare.to_string()
            } else {
                drop_initial_periods(word)
            }
        })
        .collect();
    words.join(" ")
}

/// Remove the period after each initial, so "A.J." becomes "AJ". An initial
/// is an uppercase letter with no letter directly before it.
fn drop_initial_periods(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            let after_initial = c == '.'
                && i >= 1
                && chars[i - 1].is_uppercase()
                && (i < 2 || !chars[i - 2].is_alphabetic());
            !after_initial
        })
        .map(|(_, &c)| c)
        .collect()
}

/// Linear ranking score used to pick candidates within a position.
pub fn quality_score(player: &PlayerRecord, group: &PositionGroup, weights: &QualityWeights) -> f64 {
    let mut score = 0.0;

    if player.is_hall_of_famer() {
        score += weights.hall_of_fame;
    }
    score += stat(player.all_pros) * weights.all_pro;
    score += stat(player.pro_bowls) * weights.pro_bowl;
    score += stat(player.career_seasons) * weights.season;
    score += (stat(player.total_career_games) / weights.games_divisor).min(weights.games_cap);

    let tds = stat(player.career_tds);
    score += match group.canonical() {
        Some(Position::QB) => {
            (stat(player.career_passing_yards) / weights.passing_yards_divisor)
                .min(weights.passing_yards_cap)
                + tds * weights.passer_td
        }
        Some(Position::RB) => {
            (stat(player.career_rushing_yards) / weights.rushing_yards_divisor)
                .min(weights.rushing_yards_cap)
                + tds * weights.rusher_td
        }
        Some(Position::WR | Position::TE) => {
            (stat(player.career_receiving_yards) / weights.receiving_yards_divisor)
                .min(weights.receiving_yards_cap)
                + tds * weights.receiver_td
        }
        Some(Position::OL | Position::DL | Position::LB | Position::DB) => {
            (stat(player.def_solo_tackles) / weights.tackles_divisor).min(weights.tackles_cap)
                + stat(player.def_sacks) * weights.sack
                + stat(player.def_ints) * weights.interception
        }
        Some(Position::K | Position::P) => stat(player.career_seasons) * weights.specialist_season,
        None => 0.0,
    };

    score += stat(player.playoff_performance_bonus) * weights.playoff_bonus;
    score
}

/// Lenient eligibility gate: some durability or honors, more than a cup of
/// coffee, and any recorded career activity.
pub fn passes_basic_filters(player: &PlayerRecord) -> bool {
    let games = stat(player.total_career_games);
    let seasons = stat(player.career_seasons);
    let pro_bowls = stat(player.pro_bowls);
    let all_pros = stat(player.all_pros);
    let hof = player.is_hall_of_famer();

    let durable_or_honored = games >= 16.0 || pro_bowls > 0.0 || all_pros > 0.0 || hof;
    let lasting = seasons >= 2.0 || hof || all_pros > 0.0 || pro_bowls >= 2.0;
    let active = games > 0.0 || seasons > 0.0;

    durable_or_honored && lasting && active
}

/// Build the candidate pool by position quota.
pub fn select_candidates(players: Vec<PlayerRecord>, rules: &SelectionRules) -> Selection {
    let considered = players.len();
    let mut passed_filters = 0;
    let mut unassigned = 0;
    let mut by_position: BTreeMap<Position, Vec<Candidate>> = BTreeMap::new();

    for mut player in players {
        let group = normalize_position(player.primary_pos.as_deref());
        player.primary_pos = group.as_ref().map(|g| g.to_string());
        player.full_name = clean_name(&player.full_name);
        let era = Era::from_first_year(present(player.first_year));
        player.era = Some(era.to_string());

        if !passes_basic_filters(&player) {
            continue;
        }
        passed_filters += 1;

        let position = match group.as_ref().and_then(PositionGroup::canonical) {
            Some(p) if rules.quotas.contains_key(&p) => p,
            _ => {
                unassigned += 1;
                continue;
            }
        };
        let quality = group
            .as_ref()
            .map(|g| quality_score(&player, g, &rules.quality))
            .unwrap_or_default();
        by_position.entry(position).or_default().push(Candidate {
            player,
            position,
            era,
            quality,
        });
    }

    info!(
        "Basic filters: {}/{} players pass",
        passed_filters, considered
    );
    if unassigned > 0 {
        debug!("{} players have no quota position", unassigned);
    }

    let mut selection = Selection {
        considered,
        passed_filters,
        unassigned,
        ..Selection::default()
    };

    for (position, quota) in &rules.quotas {
        let mut pool = match by_position.remove(position) {
            Some(pool) if !pool.is_empty() => pool,
            _ => {
                warn!("{}: No players found after basic filtering!", position);
                continue;
            }
        };
        let available = pool.len();
        let took_all = available as f64 <= *quota as f64 * rules.take_all_ratio;

        // Stable sort keeps input order among equal scores
        pool.sort_by(|a, b| b.quality.total_cmp(&a.quality));

        if took_all {
            info!(
                "{}: Taking all {} available players (quota: {})",
                position, available, quota
            );
        } else {
            pool.truncate((*quota).min(available));
            info!(
                "{}: Selected top {} of {} players (quota: {})",
                position,
                pool.len(),
                available,
                quota
            );
        }

        selection.quotas.push(QuotaOutcome {
            position: *position,
            available,
            quota: *quota,
            selected: pool.len(),
            took_all,
        });
        selection.candidates.extend(pool);
    }

    selection
}
