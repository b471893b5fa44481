use serde::{Deserialize, Deserializer, Serialize};

/// One row of the player index.
///
/// Every statistic is optional: a column missing from the file, an empty
/// cell, or `NaN` all read as "no data".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRecord {
    pub player_id: String,
    pub full_name: String,
    pub primary_pos: Option<String>,

    // Career span
    pub first_year: Option<f64>,
    pub last_year: Option<f64>,
    pub career_seasons: Option<f64>,
    pub total_career_games: Option<f64>,

    // Career offense
    pub career_passing_yards: Option<f64>,
    pub career_rushing_yards: Option<f64>,
    pub career_receiving_yards: Option<f64>,
    pub career_passing_tds: Option<f64>,
    pub career_rushing_tds: Option<f64>,
    pub career_receiving_tds: Option<f64>,
    pub career_tds: Option<f64>,

    // Playoffs
    pub playoff_games: Option<f64>,
    pub playoff_passing_yards: Option<f64>,
    pub playoff_rushing_yards: Option<f64>,
    pub playoff_receiving_yards: Option<f64>,
    pub playoff_passing_tds: Option<f64>,
    pub playoff_rushing_tds: Option<f64>,
    pub playoff_receiving_tds: Option<f64>,
    pub playoff_tds: Option<f64>,
    pub playoff_performance_bonus: Option<f64>,

    // Defense
    pub def_solo_tackles: Option<f64>,
    pub def_sacks: Option<f64>,
    pub def_ints: Option<f64>,

    // Honors
    pub draft_pick: Option<f64>,
    pub pro_bowls: Option<f64>,
    pub all_pros: Option<f64>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub hof_flag: Option<bool>,

    // Physical / combine
    pub height_in: Option<f64>,
    pub weight_lb: Option<f64>,
    pub forty_time: Option<f64>,
    pub bench_press: Option<f64>,
    pub vertical_jump: Option<f64>,
    pub broad_jump: Option<f64>,
    pub three_cone: Option<f64>,
    pub twenty_shuttle: Option<f64>,

    /// Era bucket, filled in by the candidate selector for snapshots
    pub era: Option<String>,
}

impl PlayerRecord {
    pub fn new(player_id: &str, full_name: &str, primary_pos: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            full_name: full_name.to_string(),
            primary_pos: Some(primary_pos.to_string()),
            ..Self::default()
        }
    }

    /// True when the player is a Hall of Famer. Missing counts as false.
    pub fn is_hall_of_famer(&self) -> bool {
        self.hof_flag.unwrap_or(false)
    }
}

/// Read a value as "no data" unless it is a real number. Infinite values are
/// kept so callers can reject the row.
pub fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Accepts the spellings different exporters use for booleans
/// (`true`/`True`/`1`/`yes`). Empty cells are `None`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "nan" => Ok(None),
        "true" | "t" | "1" | "1.0" | "yes" | "y" => Ok(Some(true)),
        "false" | "f" | "0" | "0.0" | "no" | "n" => Ok(Some(false)),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean '{}' for hof_flag",
            other
        ))),
    }
}
