use super::candidates::Selection;
use super::config::SelectionRules;
use atomic_write_file::AtomicWriteFile;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const SCHEMA_VERSION: &str = "legend_candidates_v1";
pub const PLAYERS_FILE: &str = "players.csv";
pub const MANIFEST_FILE: &str = "manifest.json";

const PROCESSING_STEPS: [&str; 5] = [
    "data_consolidation",
    "name_cleaning",
    "position_harmonization",
    "era_bucketing",
    "legend_filtering",
];

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to create snapshot directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write player rows to {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to serialize manifest for {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteringCriteria {
    pub min_games: u32,
    pub min_career_seasons: u32,
    pub requires_achievement: bool,
    pub take_all_ratio: f64,
    pub quotas: BTreeMap<String, usize>,
}

/// Metadata written next to the snapshot's player table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotManifest {
    pub snapshot_date: NaiveDate,
    pub record_count: usize,
    pub schema_version: String,
    pub input_sources: Vec<String>,
    pub processing_steps: Vec<String>,
    pub filtering_criteria: FilteringCriteria,
    pub position_distribution: BTreeMap<String, usize>,
    pub era_distribution: BTreeMap<String, usize>,
}

impl SnapshotManifest {
    pub fn new(
        date: NaiveDate,
        selection: &Selection,
        rules: &SelectionRules,
        sources: &[PathBuf],
    ) -> Self {
        Self {
            snapshot_date: date,
            record_count: selection.candidates.len(),
            schema_version: SCHEMA_VERSION.to_string(),
            input_sources: sources.iter().map(|p| p.display().to_string()).collect(),
            processing_steps: PROCESSING_STEPS.iter().map(|s| s.to_string()).collect(),
            filtering_criteria: FilteringCriteria {
                min_games: 16,
                min_career_seasons: 2,
                requires_achievement: false,
                take_all_ratio: rules.take_all_ratio,
                quotas: rules
                    .quotas
                    .iter()
                    .map(|(p, q)| (p.to_string(), *q))
                    .collect(),
            },
            position_distribution: selection.position_distribution(),
            era_distribution: selection.era_distribution(),
        }
    }
}

/// Default snapshot directory for a given day (`data/snapshots/YYYY-MM-DD`).
pub fn default_snapshot_dir(date: NaiveDate) -> PathBuf {
    PathBuf::from("data")
        .join("snapshots")
        .join(date.format("%Y-%m-%d").to_string())
}

/// Write `players.csv` and `manifest.json` into `dir`, each atomically.
pub fn write_snapshot(
    dir: &Path,
    selection: &Selection,
    manifest: &SnapshotManifest,
) -> Result<(), SnapshotError> {
    fs::create_dir_all(dir).map_err(|source| SnapshotError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let players_path = dir.join(PLAYERS_FILE);

    let file = AtomicWriteFile::open(&players_path).map_err(io_error(&players_path))?;
    let mut writer = csv::Writer::from_writer(file);
    for candidate in &selection.candidates {
        writer
            .serialize(&candidate.player)
            .map_err(|source| SnapshotError::Csv {
                path: players_path.clone(),
                source,
            })?;
    }
    let file = writer
        .into_inner()
        .map_err(|e| SnapshotError::Io {
            path: players_path.clone(),
            source: e.into_error(),
        })?;
    file.commit().map_err(io_error(&players_path))?;
    info!(
        "Saved players data: {} ({} records)",
        players_path.display(),
        selection.candidates.len()
    );

    let manifest_path = dir.join(MANIFEST_FILE);
    let mut file = AtomicWriteFile::open(&manifest_path).map_err(io_error(&manifest_path))?;
    serde_json::to_writer_pretty(&mut file, manifest).map_err(|source| SnapshotError::Json {
        path: manifest_path.clone(),
        source,
    })?;
    file.commit().map_err(io_error(&manifest_path))?;
    info!("Saved manifest: {}", manifest_path.display());

    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> SnapshotError {
    let path = path.to_path_buf();
    move |source| SnapshotError::Io { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{load_players_from_reader, PlayerRecord};
    use crate::selection::select_candidates;
    use std::fs::File;

    fn sample_selection() -> Selection {
        let players: Vec<PlayerRecord> = ["QB", "QB", "OT", "SS"]
            .iter()
            .enumerate()
            .map(|(i, pos)| {
                let mut p = PlayerRecord::new(&format!("00-{}", i), "joe  player", pos);
                p.total_career_games = Some(100.0);
                p.career_seasons = Some(7.0);
                p.first_year = Some(1990.0 + i as f64 * 10.0);
                p.hof_flag = Some(i == 0);
                p
            })
            .collect();
        select_candidates(players, &SelectionRules::default())
    }

    #[test]
    fn test_default_snapshot_dir() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            default_snapshot_dir(date),
            PathBuf::from("data/snapshots/2024-03-09")
        );
    }

    #[test]
    fn test_manifest_contents() {
        let selection = sample_selection();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let manifest = SnapshotManifest::new(
            date,
            &selection,
            &SelectionRules::default(),
            &[PathBuf::from("data/raw/players.csv")],
        );
        assert_eq!(manifest.record_count, 4);
        assert_eq!(manifest.position_distribution["QB"], 2);
        assert_eq!(manifest.position_distribution["OL"], 1);
        assert_eq!(manifest.position_distribution["DB"], 1);
        assert_eq!(manifest.era_distribution["2010s"], 1);
        assert_eq!(manifest.filtering_criteria.quotas["K"], 120);
        assert_eq!(manifest.processing_steps.len(), 5);
    }

    #[test]
    fn test_write_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("snapshots").join("2024-03-09");
        let selection = sample_selection();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let manifest = SnapshotManifest::new(date, &selection, &SelectionRules::default(), &[]);

        write_snapshot(&out, &selection, &manifest).unwrap();

        let file = File::open(out.join(PLAYERS_FILE)).unwrap();
        let (players, skipped) = load_players_from_reader(file).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(players.len(), 4);
        assert_eq!(players[0].full_name, "Joe Player");
        assert_eq!(players[0].hof_flag, Some(true));
        assert_eq!(players[2].primary_pos.as_deref(), Some("OL"));
        assert_eq!(players[2].era.as_deref(), Some("2010s"));

        let json = fs::read_to_string(out.join(MANIFEST_FILE)).unwrap();
        let loaded: SnapshotManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, manifest);
        assert!(json.contains("\"snapshot_date\": \"2024-03-09\""));
    }
}
