use super::attributes::{Attribute, AttributeKind};
use crate::player::{present, PlayerRecord};
use std::collections::HashMap;

/// Score given when there is nothing to compare against.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Share of `peers` the value beats, on a 0-100 scale.
///
/// Comparisons are strict: peers equal to `value` count against it from
/// either direction. A missing value or an empty peer set scores
/// [`NEUTRAL_SCORE`].
pub fn percentile_score(value: Option<f64>, peers: &[f64], higher_is_better: bool) -> f64 {
    group_percentile_score(value, peers, peers.len(), higher_is_better)
}

/// Like [`percentile_score`], but the share is taken over `group_size`
/// members, of which only `comparable` carry a value. Members without one
/// still count in the denominator and are never beaten.
pub fn group_percentile_score(
    value: Option<f64>,
    comparable: &[f64],
    group_size: usize,
    higher_is_better: bool,
) -> f64 {
    let Some(value) = present(value) else {
        return NEUTRAL_SCORE;
    };
    let group_size = group_size.max(comparable.len());
    if group_size == 0 {
        return NEUTRAL_SCORE;
    }

    let beaten = if higher_is_better {
        comparable.iter().filter(|&&p| p < value).count()
    } else {
        comparable.iter().filter(|&&p| p > value).count()
    };
    beaten as f64 * 100.0 / group_size as f64
}

/// Binary score for membership attributes such as the Hall of Fame.
pub fn flag_score(flag: Option<bool>) -> f64 {
    if flag.unwrap_or(false) {
        100.0
    } else {
        0.0
    }
}

/// Per-attribute value distributions for one peer group.
///
/// Built once from the whole group before any member is scored, then only
/// read. Missing and non-finite values are left out of the value vectors,
/// as are undrafted sentinel picks. [`PeerDistributions::score`] still
/// counts every member in the denominator.
#[derive(Debug, Clone, Default)]
pub struct PeerDistributions {
    values: HashMap<Attribute, Vec<f64>>,
    group_size: usize,
}

impl PeerDistributions {
    pub fn from_members(members: &[&PlayerRecord], undrafted_pick: f64) -> Self {
        let mut values: HashMap<Attribute, Vec<f64>> = HashMap::new();

        for attribute in Attribute::ALL {
            if attribute.kind() == AttributeKind::Flag {
                continue;
            }
            let column: Vec<f64> = members
                .iter()
                .filter_map(|player| present(attribute.raw_value(player)))
                .filter(|v| v.is_finite())
                .filter(|v| attribute != Attribute::DraftPick || *v != undrafted_pick)
                .collect();
            values.insert(attribute, column);
        }

        Self {
            values,
            group_size: members.len(),
        }
    }

    /// Number of members in the group, with or without a value.
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Percentile of `value` for `attribute` against the whole group.
    pub fn score(&self, attribute: Attribute, value: Option<f64>, higher_is_better: bool) -> f64 {
        group_percentile_score(
            value,
            self.values(attribute),
            self.group_size,
            higher_is_better,
        )
    }

    pub fn values(&self, attribute: Attribute) -> &[f64] {
        self.values
            .get(&attribute)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_percentile_higher_better() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(percentile_score(Some(30.0), &values, true), 40.0); // 2/5
        assert_eq!(percentile_score(Some(60.0), &values, true), 100.0);
        assert_eq!(percentile_score(Some(5.0), &values, true), 0.0);
    }

    #[test]
    fn test_percentile_lower_better() {
        let times = [4.3, 4.4, 4.5, 4.6, 4.7];
        assert_eq!(percentile_score(Some(4.3), &times, false), 80.0); // 4/5
        assert_eq!(percentile_score(Some(4.7), &times, false), 0.0);
    }

    #[test]
    fn test_missing_value_is_neutral() {
        let values = [10.0, 20.0, 30.0];
        assert_eq!(percentile_score(None, &values, true), 50.0);
        assert_eq!(percentile_score(Some(f64::NAN), &values, true), 50.0);
    }

    #[test]
    fn test_empty_peers_is_neutral() {
        assert_eq!(percentile_score(Some(25.0), &[], true), 50.0);
        assert_eq!(percentile_score(Some(25.0), &[], false), 50.0);
    }

    #[test]
    fn test_ties_do_not_count() {
        let values = [10.0, 20.0, 20.0, 20.0, 30.0];
        assert_eq!(percentile_score(Some(20.0), &values, true), 20.0);
        assert_eq!(percentile_score(Some(20.0), &values, false), 20.0);
    }

    #[test]
    fn test_flag_score() {
        assert_eq!(flag_score(Some(true)), 100.0);
        assert_eq!(flag_score(Some(false)), 0.0);
        assert_eq!(flag_score(None), 0.0);
    }

    #[test]
    fn test_distributions_skip_missing_and_sentinel() {
        let mut a = PlayerRecord::new("1", "A", "QB");
        a.height_in = Some(74.0);
        a.draft_pick = Some(1.0);
        let mut b = PlayerRecord::new("2", "B", "QB");
        b.height_in = Some(f64::NAN);
        b.draft_pick = Some(999.0);
        let mut c = PlayerRecord::new("3", "C", "QB");
        c.height_in = Some(f64::INFINITY);
        c.draft_pick = Some(32.0);

        let peers = PeerDistributions::from_members(&[&a, &b, &c], 999.0);
        assert_eq!(peers.values(Attribute::Height), &[74.0]);
        assert_eq!(peers.values(Attribute::DraftPick), &[1.0, 32.0]);
        assert!(peers.values(Attribute::DefSacks).is_empty());
        assert!(peers.values(Attribute::HofFlag).is_empty());
        assert_eq!(peers.group_size(), 3);
    }

    #[test]
    fn test_sparse_column_divides_by_group_size() {
        // Ten quarterbacks, only two ran the forty
        let mut group: Vec<PlayerRecord> = (0..10)
            .map(|i| PlayerRecord::new(&i.to_string(), "QB", "QB"))
            .collect();
        group[0].forty_time = Some(4.5);
        group[1].forty_time = Some(4.9);
        let members: Vec<&PlayerRecord> = group.iter().collect();
        let peers = PeerDistributions::from_members(&members, 999.0);

        assert_eq!(peers.score(Attribute::FortyTime, Some(4.5), false), 10.0);
        assert_eq!(peers.score(Attribute::FortyTime, Some(4.9), false), 0.0);
        assert_eq!(peers.score(Attribute::FortyTime, None, false), 50.0);
    }

    #[test]
    fn test_group_percentile_score() {
        assert_eq!(group_percentile_score(Some(30.0), &[10.0, 20.0], 8, true), 25.0);
        assert_eq!(group_percentile_score(Some(30.0), &[], 0, true), 50.0);
        // Group size never drops below the comparable count
        assert_eq!(group_percentile_score(Some(30.0), &[10.0, 20.0], 0, true), 100.0);
    }

    proptest! {
        /// Property: the score is exactly the share of peers strictly below.
        #[test]
        fn matches_strict_share(
            value in -1000.0f64..1000.0,
            peers in prop::collection::vec(-1000.0f64..1000.0, 1..50)
        ) {
            let below = peers.iter().filter(|&&p| p < value).count();
            let expected = below as f64 * 100.0 / peers.len() as f64;
            prop_assert_eq!(percentile_score(Some(value), &peers, true), expected);
        }

        /// Property: raising the value never lowers a higher-is-better score,
        /// and never raises a lower-is-better score.
        #[test]
        fn monotonic_in_value(
            a in -1000.0f64..1000.0,
            b in -1000.0f64..1000.0,
            peers in prop::collection::vec(-1000.0f64..1000.0, 0..50)
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                percentile_score(Some(lo), &peers, true) <= percentile_score(Some(hi), &peers, true)
            );
            prop_assert!(
                percentile_score(Some(lo), &peers, false) >= percentile_score(Some(hi), &peers, false)
            );
        }

        /// Property: scores stay within 0-100.
        #[test]
        fn bounded(
            value in -1000.0f64..1000.0,
            peers in prop::collection::vec(-1000.0f64..1000.0, 0..50),
            higher in any::<bool>()
        ) {
            let score = percentile_score(Some(value), &peers, higher);
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }
}
