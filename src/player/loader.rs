use super::types::PlayerRecord;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no input files given")]
    NoInputs,

    #[error("invalid input pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("no files match '{pattern}'")]
    NoMatches { pattern: String },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

/// Players read from one or more input tables.
#[derive(Debug, Default)]
pub struct LoadedPlayers {
    pub players: Vec<PlayerRecord>,
    /// Rows that could not be deserialized and were skipped
    pub skipped_rows: usize,
    pub sources: Vec<PathBuf>,
}

/// Expand input arguments into concrete file paths.
///
/// Arguments containing glob metacharacters are expanded and sorted; plain
/// paths are passed through as-is so a missing file surfaces as an I/O error
/// naming it.
pub fn resolve_inputs(patterns: &[String]) -> Result<Vec<PathBuf>, LoadError> {
    if patterns.is_empty() {
        return Err(LoadError::NoInputs);
    }

    let mut paths = Vec::new();
    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(pattern));
            continue;
        }

        let entries = glob::glob(pattern).map_err(|source| LoadError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        let mut matched: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("skipping unreadable match for '{}': {}", pattern, e);
                    None
                }
            })
            .collect();

        if matched.is_empty() {
            return Err(LoadError::NoMatches {
                pattern: pattern.clone(),
            });
        }
        matched.sort();
        paths.extend(matched);
    }
    Ok(paths)
}

/// Load and concatenate every input table, in order.
pub fn load_players(paths: &[PathBuf]) -> Result<LoadedPlayers, LoadError> {
    let mut loaded = LoadedPlayers::default();

    for path in paths {
        let (players, skipped) = load_players_from_path(path)?;
        info!("Loaded {} players from {}", players.len(), path.display());
        loaded.players.extend(players);
        loaded.skipped_rows += skipped;
        loaded.sources.push(path.clone());
    }

    Ok(loaded)
}

fn load_players_from_path(path: &Path) -> Result<(Vec<PlayerRecord>, usize), LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_players_from_reader(file).map_err(|source| LoadError::Csv {
        path: path.display().to_string(),
        source,
    })
}

/// Parse a player table. Malformed rows are logged and skipped; only a
/// broken header fails the whole table.
pub fn load_players_from_reader<R: Read>(
    rdr: R,
) -> Result<(Vec<PlayerRecord>, usize), csv::Error> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(rdr);
    reader.headers()?;

    let mut players = Vec::new();
    let mut skipped = 0;
    for (index, result) in reader.deserialize::<PlayerRecord>().enumerate() {
        match result {
            Ok(player) => players.push(player),
            Err(e) => {
                // Row numbers are 1-based and count the header line
                warn!("skipping malformed player row {}: {}", index + 2, e);
                skipped += 1;
            }
        }
    }
    debug!("Parsed {} rows ({} skipped)", players.len() + skipped, skipped);
    Ok((players, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
player_id,full_name,primary_pos,height_in,weight_lb,forty_time,draft_pick,pro_bowls,all_pros,hof_flag,total_career_games
00-001,Tom Brady,QB,76,225,5.28,199,15,3,True,335
00-002,Jerry Rice,WR,74,200,4.59,16,13,10,True,303
00-003,Practice Squad,WR,,,,999,0,0,False,2
";

    #[test]
    fn test_load_from_reader() {
        let (players, skipped) = load_players_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(players.len(), 3);

        let brady = &players[0];
        assert_eq!(brady.player_id, "00-001");
        assert_eq!(brady.primary_pos.as_deref(), Some("QB"));
        assert_eq!(brady.forty_time, Some(5.28));
        assert_eq!(brady.hof_flag, Some(true));

        let squad = &players[2];
        assert!(squad.height_in.is_none());
        assert_eq!(squad.draft_pick, Some(999.0));
        assert_eq!(squad.hof_flag, Some(false));
    }

    #[test]
    fn test_missing_columns_read_as_none() {
        let csv = "player_id,full_name,primary_pos\n00-001,Ed Reed,S\n";
        let (players, _) = load_players_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(players.len(), 1);
        assert!(players[0].career_passing_yards.is_none());
        assert!(players[0].hof_flag.is_none());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let csv = "player_id,full_name,primary_pos,pro_bowls\n 00-001 , Ray Lewis , MLB , 13 \n";
        let (players, _) = load_players_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(players[0].player_id, "00-001");
        assert_eq!(players[0].primary_pos.as_deref(), Some("MLB"));
        assert_eq!(players[0].pro_bowls, Some(13.0));
    }

    #[test]
    fn test_malformed_row_is_skipped() {
        let csv = "\
player_id,full_name,primary_pos,pro_bowls,hof_flag
00-001,Good Row,QB,3,False
00-002,Bad Number,QB,many,False
00-003,Bad Flag,QB,1,maybe
00-004,Another Good Row,QB,0,
";
        let (players, skipped) = load_players_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(skipped, 2);
        assert_eq!(players.len(), 2);
        assert_eq!(players[1].player_id, "00-004");
        assert!(players[1].hof_flag.is_none());
    }

    #[test]
    fn test_resolve_inputs_empty() {
        assert!(matches!(resolve_inputs(&[]), Err(LoadError::NoInputs)));
    }

    #[test]
    fn test_resolve_plain_path_passes_through() {
        let paths = resolve_inputs(&["does/not/exist.csv".to_string()]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("does/not/exist.csv")]);
    }

    #[test]
    fn test_resolve_glob_without_matches() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("*.csv").display().to_string();
        assert!(matches!(
            resolve_inputs(&[pattern]),
            Err(LoadError::NoMatches { .. })
        ));
    }

    #[test]
    fn test_load_multiple_files_concatenates() {
        let dir = tempfile::tempdir().unwrap();
        let modern = dir.path().join("a_modern.csv");
        let historical = dir.path().join("b_historical.csv");
        std::fs::File::create(&modern)
            .unwrap()
            .write_all(SAMPLE.as_bytes())
            .unwrap();
        std::fs::File::create(&historical)
            .unwrap()
            .write_all(b"player_id,full_name,primary_pos,hof_flag\nH-001,Jim Brown,FB,1\n")
            .unwrap();

        let pattern = dir.path().join("*.csv").display().to_string();
        let paths = resolve_inputs(&[pattern]).unwrap();
        assert_eq!(paths, vec![modern, historical]);

        let loaded = load_players(&paths).unwrap();
        assert_eq!(loaded.players.len(), 4);
        assert_eq!(loaded.players[3].full_name, "Jim Brown");
        assert_eq!(loaded.sources.len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_players(&[PathBuf::from("/nonexistent/players.csv")]);
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
