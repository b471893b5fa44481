use crate::pipeline::DEFAULT_MIN_POSITION_PLAYERS;
use crate::scoring::ScoringConfig;
use crate::selection::SelectionConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_GAMES: u32 = 16;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub pipeline: Option<PipelineConfig>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    #[serde(default)]
    pub selection: Option<SelectionConfig>,
}

impl Config {
    /// Config with every section filled with the built-in values, as written
    /// by `init`.
    pub fn with_defaults() -> Self {
        Self {
            pipeline: Some(PipelineConfig::default()),
            scoring: Some(ScoringConfig::default()),
            selection: Some(SelectionConfig::default()),
        }
    }

    pub fn min_games(&self) -> u32 {
        self.pipeline
            .as_ref()
            .and_then(|p| p.min_games)
            .unwrap_or(DEFAULT_MIN_GAMES)
    }

    pub fn min_position_players(&self) -> usize {
        self.pipeline
            .as_ref()
            .and_then(|p| p.min_position_players)
            .unwrap_or(DEFAULT_MIN_POSITION_PLAYERS)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Minimum career games to be scored (default: 16, 0 keeps everyone)
    #[serde(default)]
    pub min_games: Option<u32>,

    /// Smallest position group that gets scored (default: 3)
    #[serde(default)]
    pub min_position_players: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_games: Some(DEFAULT_MIN_GAMES),
            min_position_players: Some(DEFAULT_MIN_POSITION_PLAYERS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.scoring.is_none());
        assert_eq!(config.min_games(), 16);
        assert_eq!(config.min_position_players(), 3);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
pipeline:
  min_games: 32
  min_position_players: 5
scoring:
  fallback_position: DB
selection:
  take_all_ratio: 0.4
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.min_games(), 32);
        assert_eq!(config.min_position_players(), 5);
        assert_eq!(
            config.scoring.unwrap().fallback_position,
            Some(Position::DB)
        );
        assert_eq!(config.selection.unwrap().take_all_ratio, Some(0.4));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let yaml = "queries:\n  - name: x\n";
        let result: Result<Config, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_roundtrip_through_yaml() {
        let config = Config::with_defaults();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
