pub mod candidates;
pub mod config;
pub mod era;
pub mod snapshot;

pub use candidates::{
    clean_name, passes_basic_filters, quality_score, select_candidates, Candidate, QuotaOutcome,
    Selection,
};
pub use config::{
    default_quotas, validate_selection, QualityWeights, SelectionConfig, SelectionRules,
    DEFAULT_TAKE_ALL_RATIO,
};
pub use era::Era;
pub use snapshot::{
    default_snapshot_dir, write_snapshot, SnapshotError, SnapshotManifest, MANIFEST_FILE,
    PLAYERS_FILE,
};
