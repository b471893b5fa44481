use crate::player::PlayerRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an attribute turns a raw value into a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Ranked against same-position peers
    Percentile { higher_is_better: bool },
    /// Ranked like `Percentile { higher_is_better: false }`, except undrafted
    /// players get a fixed score and never enter the distribution
    DraftPosition,
    /// Binary membership, 100 or 0
    Flag,
}

/// Attributes a position weight table can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Height,
    Weight,
    FortyTime,
    VerticalJump,
    BenchPress,
    DraftPick,
    CareerPassingYards,
    CareerPassingTds,
    CareerRushingYards,
    CareerRushingTds,
    CareerReceivingYards,
    CareerReceivingTds,
    PlayoffPassingYards,
    PlayoffPassingTds,
    PlayoffRushingYards,
    PlayoffReceivingYards,
    PlayoffReceivingTds,
    DefSoloTackles,
    DefSacks,
    DefInts,
    CareerSeasons,
    TotalCareerGames,
    ProBowls,
    AllPros,
    HofFlag,
}

impl Attribute {
    pub const ALL: [Attribute; 25] = [
        Attribute::Height,
        Attribute::Weight,
        Attribute::FortyTime,
        Attribute::VerticalJump,
        Attribute::BenchPress,
        Attribute::DraftPick,
        Attribute::CareerPassingYards,
        Attribute::CareerPassingTds,
        Attribute::CareerRushingYards,
        Attribute::CareerRushingTds,
        Attribute::CareerReceivingYards,
        Attribute::CareerReceivingTds,
        Attribute::PlayoffPassingYards,
        Attribute::PlayoffPassingTds,
        Attribute::PlayoffRushingYards,
        Attribute::PlayoffReceivingYards,
        Attribute::PlayoffReceivingTds,
        Attribute::DefSoloTackles,
        Attribute::DefSacks,
        Attribute::DefInts,
        Attribute::CareerSeasons,
        Attribute::TotalCareerGames,
        Attribute::ProBowls,
        Attribute::AllPros,
        Attribute::HofFlag,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Height => "height",
            Attribute::Weight => "weight",
            Attribute::FortyTime => "forty_time",
            Attribute::VerticalJump => "vertical_jump",
            Attribute::BenchPress => "bench_press",
            Attribute::DraftPick => "draft_pick",
            Attribute::CareerPassingYards => "career_passing_yards",
            Attribute::CareerPassingTds => "career_passing_tds",
            Attribute::CareerRushingYards => "career_rushing_yards",
            Attribute::CareerRushingTds => "career_rushing_tds",
            Attribute::CareerReceivingYards => "career_receiving_yards",
            Attribute::CareerReceivingTds => "career_receiving_tds",
            Attribute::PlayoffPassingYards => "playoff_passing_yards",
            Attribute::PlayoffPassingTds => "playoff_passing_tds",
            Attribute::PlayoffRushingYards => "playoff_rushing_yards",
            Attribute::PlayoffReceivingYards => "playoff_receiving_yards",
            Attribute::PlayoffReceivingTds => "playoff_receiving_tds",
            Attribute::DefSoloTackles => "def_solo_tackles",
            Attribute::DefSacks => "def_sacks",
            Attribute::DefInts => "def_ints",
            Attribute::CareerSeasons => "career_seasons",
            Attribute::TotalCareerGames => "total_career_games",
            Attribute::ProBowls => "pro_bowls",
            Attribute::AllPros => "all_pros",
            Attribute::HofFlag => "hof_flag",
        }
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            // Timed events: a smaller number is the better athlete
            Attribute::FortyTime => AttributeKind::Percentile {
                higher_is_better: false,
            },
            Attribute::DraftPick => AttributeKind::DraftPosition,
            Attribute::HofFlag => AttributeKind::Flag,
            _ => AttributeKind::Percentile {
                higher_is_better: true,
            },
        }
    }

    /// Honors are always scored, even for players with no recorded value.
    pub fn always_scored(&self) -> bool {
        matches!(
            self,
            Attribute::DraftPick | Attribute::ProBowls | Attribute::AllPros | Attribute::HofFlag
        )
    }

    /// The raw numeric column behind this attribute. `None` for flags.
    pub fn raw_value(&self, player: &PlayerRecord) -> Option<f64> {
        match self {
            Attribute::Height => player.height_in,
            Attribute::Weight => player.weight_lb,
            Attribute::FortyTime => player.forty_time,
            Attribute::VerticalJump => player.vertical_jump,
            Attribute::BenchPress => player.bench_press,
            Attribute::DraftPick => player.draft_pick,
            Attribute::CareerPassingYards => player.career_passing_yards,
            Attribute::CareerPassingTds => player.career_passing_tds,
            Attribute::CareerRushingYards => player.career_rushing_yards,
            Attribute::CareerRushingTds => player.career_rushing_tds,
            Attribute::CareerReceivingYards => player.career_receiving_yards,
            Attribute::CareerReceivingTds => player.career_receiving_tds,
            Attribute::PlayoffPassingYards => player.playoff_passing_yards,
            Attribute::PlayoffPassingTds => player.playoff_passing_tds,
            Attribute::PlayoffRushingYards => player.playoff_rushing_yards,
            Attribute::PlayoffReceivingYards => player.playoff_receiving_yards,
            Attribute::PlayoffReceivingTds => player.playoff_receiving_tds,
            Attribute::DefSoloTackles => player.def_solo_tackles,
            Attribute::DefSacks => player.def_sacks,
            Attribute::DefInts => player.def_ints,
            Attribute::CareerSeasons => player.career_seasons,
            Attribute::TotalCareerGames => player.total_career_games,
            Attribute::ProBowls => player.pro_bowls,
            Attribute::AllPros => player.all_pros,
            Attribute::HofFlag => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forty_time_is_lower_better() {
        assert_eq!(
            Attribute::FortyTime.kind(),
            AttributeKind::Percentile {
                higher_is_better: false
            }
        );
        assert_eq!(
            Attribute::Height.kind(),
            AttributeKind::Percentile {
                higher_is_better: true
            }
        );
    }

    #[test]
    fn test_special_kinds() {
        assert_eq!(Attribute::DraftPick.kind(), AttributeKind::DraftPosition);
        assert_eq!(Attribute::HofFlag.kind(), AttributeKind::Flag);
    }

    #[test]
    fn test_raw_value_reads_matching_column() {
        let mut player = PlayerRecord::new("00-001", "Test", "QB");
        player.height_in = Some(76.0);
        player.career_passing_tds = Some(649.0);
        player.hof_flag = Some(true);

        assert_eq!(Attribute::Height.raw_value(&player), Some(76.0));
        assert_eq!(Attribute::CareerPassingTds.raw_value(&player), Some(649.0));
        assert_eq!(Attribute::Weight.raw_value(&player), None);
        assert_eq!(Attribute::HofFlag.raw_value(&player), None);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = Attribute::ALL.iter().map(|a| a.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Attribute::ALL.len());
    }

    #[test]
    fn test_parse_attribute_name() {
        let attr: Attribute = serde_saphyr::from_str("playoff_passing_tds").unwrap();
        assert_eq!(attr, Attribute::PlayoffPassingTds);
    }
}
