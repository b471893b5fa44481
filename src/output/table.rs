use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::path::Path;

use crate::pipeline::LegendRow;

/// Write legend rows as CSV atomically, creating parent directories.
///
/// The file is replaced only once every row has been written.
pub fn write_legend_csv<'a>(
    path: &Path,
    rows: impl IntoIterator<Item = &'a LegendRow>,
) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);

    let mut count = 0;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row for {}", row.player_id))?;
        count += 1;
    }
    if count == 0 {
        writer
            .write_record(["player_id", "full_name", "position", "legend_score", "source_tier"])
            .context("Failed to write CSV header")?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save legend scores to {}", path.display()))?;

    Ok(count)
}
