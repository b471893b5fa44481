pub mod formatter;
pub mod table;

pub use formatter::{
    format_dry_run, format_elapsed, format_explain, format_leaders, format_score, format_selection,
    format_skipped_rows, format_summary, should_use_colors,
};
pub use table::write_legend_csv;
