use std::io::IsTerminal;
use std::time::Duration;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::pipeline::{GroupSummary, PipelineOutcome, ScoredPlayer};
use crate::selection::Selection;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a legend score with two decimals.
/// If fallback is true, appends asterisk to mark scores from borrowed weights
pub fn format_score(score: f64, fallback: bool) -> String {
    if fallback {
        format!("{:.2}*", score)
    } else {
        format!("{:.2}", score)
    }
}

/// Format elapsed time at millisecond precision ("1s 250ms")
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = Duration::from_millis(elapsed.as_millis() as u64);
    humantime::format_duration(millis).to_string()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Highest scorer in each position group, in group order.
fn top_scorers(outcome: &PipelineOutcome) -> Vec<&ScoredPlayer> {
    let mut best: Vec<&ScoredPlayer> = Vec::new();
    for scored in &outcome.scored {
        match best.iter_mut().find(|b| b.row.position == scored.row.position) {
            Some(current) if scored.row.legend_score > current.row.legend_score => *current = scored,
            Some(_) => {}
            None => best.push(scored),
        }
    }
    best
}

/// Format the top scorer per position as a table
/// Columns: position (4 chars), score (7 chars, right-aligned), name, id
pub fn format_leaders(outcome: &PipelineOutcome, use_colors: bool) -> String {
    let leaders = top_scorers(outcome);
    if leaders.is_empty() {
        return "No players scored.".to_string();
    }

    let term_width = get_terminal_width();
    let position_width = 4;
    let score_width = 7;
    let separator = "  ";

    leaders
        .iter()
        .map(|scored| {
            let position = format!("{:<width$}", scored.row.position, width = position_width);
            let score = format_score(scored.row.legend_score, scored.detail.used_fallback);
            let score_padded = format!("{:>width$}", score, width = score_width);
            let id = &scored.row.player_id;

            let fixed_width = position_width + score_width + separator.len() * 3 + id.len();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&scored.row.full_name, width - fixed_width)
                }
                Some(_) => truncate_name(&scored.row.full_name, 20),
                None => scored.row.full_name.clone(),
            };

            if use_colors {
                format!(
                    "{}{}{}{}{}{}{}",
                    position.cyan(),
                    separator,
                    score_padded.bold(),
                    separator,
                    name,
                    separator,
                    id.dimmed()
                )
            } else {
                format!(
                    "{}{}{}{}{}{}{}",
                    position, separator, score_padded, separator, name, separator, id
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the end-of-run summary
pub fn format_summary(outcome: &PipelineOutcome, elapsed: Duration, use_colors: bool) -> String {
    let mut lines = Vec::new();
    let scored_groups = outcome.groups.iter().filter(|g| g.scored).count();

    let headline = format!(
        "Scored {} players across {} positions in {}",
        outcome.scored.len(),
        scored_groups,
        format_elapsed(elapsed)
    );
    lines.push(if use_colors {
        headline.bold().to_string()
    } else {
        headline
    });

    let scores: Vec<f64> = outcome.rows().map(|r| r.legend_score).collect();
    if !scores.is_empty() {
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        lines.push(format!(
            "  Score range: {:.2} - {:.2} (mean {:.2})",
            min, max, mean
        ));
    }

    for group in outcome.skipped_groups() {
        lines.push(format!(
            "  Skipped {}: only {} players",
            group.position, group.players
        ));
    }
    if outcome.fallback_scored > 0 {
        lines.push(format!(
            "  Fallback weights: {} players (marked *)",
            outcome.fallback_scored
        ));
    }
    if outcome.unlabeled > 0 {
        lines.push(format!("  No position: {} players", outcome.unlabeled));
    }
    if !outcome.failures.is_empty() {
        let failures = format!("  Failed: {} players", outcome.failures.len());
        lines.push(if use_colors {
            failures.red().to_string()
        } else {
            failures
        });
    }

    lines.join("\n")
}

/// Format the per-group plan shown by `--dry-run`
pub fn format_dry_run(plan: &[GroupSummary], eligible: usize, use_colors: bool) -> String {
    let mut lines = vec![format!(
        "[DRY RUN] {} eligible players in {} position groups",
        eligible,
        plan.len()
    )];
    for group in plan {
        let status = if group.scored { "score" } else { "skip" };
        let line = format!("  {:<4} {:>6}  {}", group.position, group.players, status);
        lines.push(if use_colors && !group.scored {
            line.yellow().to_string()
        } else {
            line
        });
    }
    lines.join("\n")
}

/// Format one player's score breakdown for `--explain`
pub fn format_explain(scored: &ScoredPlayer, use_colors: bool) -> String {
    let detail = &scored.detail;
    let header = format!(
        "{} ({}) {} {}",
        scored.row.full_name,
        scored.row.player_id,
        scored.row.position,
        format_score(scored.row.legend_score, detail.used_fallback)
    );
    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    if detail.used_fallback {
        lines.push(format!("  weights borrowed from {}", detail.weights_from));
    }

    for c in &detail.breakdown {
        let mut line = format!(
            "  {:<26} {:>6.2} x {:.3}",
            c.attribute.name(),
            c.score,
            c.weight
        );
        if c.imputed {
            line.push_str("  (no data)");
        }
        lines.push(if use_colors && c.imputed {
            line.dimmed().to_string()
        } else {
            line
        });
    }
    lines.join("\n")
}

/// Format the candidate selection report
/// Note about input rows dropped at load time, if any.
pub fn format_skipped_rows(skipped_rows: usize) -> Option<String> {
    match skipped_rows {
        0 => None,
        1 => Some("  Skipped 1 unreadable input row".to_string()),
        n => Some(format!("  Skipped {} unreadable input rows", n)),
    }
}

pub fn format_selection(selection: &Selection, use_colors: bool) -> String {
    let headline = format!(
        "Selected {} of {} players ({} passed basic filters)",
        selection.candidates.len(),
        selection.considered,
        selection.passed_filters
    );
    let mut lines = vec![if use_colors {
        headline.bold().to_string()
    } else {
        headline
    }];
    for q in &selection.quotas {
        let how = if q.took_all { "all" } else { "top" };
        lines.push(format!(
            "  {:<4} {:>5} of {:>5}  quota {:>4}  ({})",
            q.position.as_str(),
            q.selected,
            q.available,
            q.quota,
            how
        ));
    }
    let eras = selection.era_distribution();
    if !eras.is_empty() {
        lines.push("  Eras:".to_string());
        for (era, count) in eras {
            lines.push(format!("    {:<24} {:>5}", era, count));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{process_players, PipelineOptions};
    use crate::player::PlayerRecord;
    use crate::scoring::ScoringModel;

    fn sample_outcome() -> PipelineOutcome {
        let mut players = Vec::new();
        for (i, name) in ["Tom Brady", "Joe Montana", "Dan Marino"].iter().enumerate() {
            let mut p = PlayerRecord::new(&format!("QB-{}", i), name, "QB");
            p.career_passing_yards = Some(40_000.0 + i as f64 * 10_000.0);
            players.push(p);
        }
        for i in 0..3 {
            players.push(PlayerRecord::new(&format!("KR-{}", i), "Devin Hester", "KR"));
        }
        players.push(PlayerRecord::new("P-0", "Ray Guy", "P"));
        process_players(&players, &PipelineOptions::default(), &ScoringModel::default())
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(87.254, false), "87.25");
        assert_eq!(format_score(50.0, true), "50.00*");
        assert_eq!(format_score(0.0, false), "0.00");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_micros(1_250_400)), "1s 250ms");
        assert_eq!(format_elapsed(Duration::from_millis(0)), "0s");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Ray Guy", 20), "Ray Guy");
        assert_eq!(truncate_name("Christian Okoye", 10), "Christi...");
        assert_eq!(truncate_name("Ray Guy", 3), "Ray");
    }

    #[test]
    fn test_format_leaders() {
        let outcome = sample_outcome();
        let result = format_leaders(&outcome, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("QB"));
        assert!(lines[0].contains("QB-2"));
        assert!(lines[1].starts_with("KR"));
        assert!(lines[1].contains('*'));
    }

    #[test]
    fn test_format_leaders_empty() {
        let outcome = PipelineOutcome::default();
        assert_eq!(format_leaders(&outcome, false), "No players scored.");
    }

    #[test]
    fn test_format_summary() {
        let outcome = sample_outcome();
        let result = format_summary(&outcome, Duration::from_millis(1500), false);
        assert!(result.starts_with("Scored 6 players across 2 positions in 1s 500ms"));
        assert!(result.contains("Score range:"));
        assert!(result.contains("Skipped P: only 1 players"));
        assert!(result.contains("Fallback weights: 3 players"));
        assert!(!result.contains("Failed"));
    }

    #[test]
    fn test_format_skipped_rows() {
        assert_eq!(format_skipped_rows(0), None);
        assert_eq!(
            format_skipped_rows(1).as_deref(),
            Some("  Skipped 1 unreadable input row")
        );
        assert_eq!(
            format_skipped_rows(4).as_deref(),
            Some("  Skipped 4 unreadable input rows")
        );
    }

    #[test]
    fn test_format_dry_run() {
        let plan = vec![
            GroupSummary {
                position: "QB".to_string(),
                players: 12,
                scored: true,
            },
            GroupSummary {
                position: "P".to_string(),
                players: 2,
                scored: false,
            },
        ];
        let result = format_dry_run(&plan, 14, false);
        assert!(result.starts_with("[DRY RUN] 14 eligible players in 2 position groups"));
        assert!(result.contains("QB       12  score"));
        assert!(result.contains("P         2  skip"));
    }

    #[test]
    fn test_format_explain() {
        let outcome = sample_outcome();
        let scored = outcome.find("QB-2").unwrap();
        let result = format_explain(scored, false);
        assert!(result.starts_with("Dan Marino (QB-2) QB"));
        assert!(result.contains("career_passing_yards"));
        assert!(result.contains("(no data)"));
        assert!(!result.contains("borrowed"));
    }
}
