use crate::models::VideoRecord;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `records` to `<csv_dir>/<prefix>_<YYYYmmdd_HHMMSS>.csv`.
///
/// Nothing is written for an empty slice; the directory path is returned.
pub fn save_to_csv(records: &[VideoRecord], csv_dir: &Path, prefix: &str) -> Result<PathBuf> {
    if records.is_empty() {
        info!("No videos to save, skipping CSV");
        return Ok(csv_dir.to_path_buf());
    }

    fs::create_dir_all(csv_dir)
        .with_context(|| format!("creating CSV directory {}", csv_dir.display()))?;
    let date_str = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let filepath = csv_dir.join(format!("{prefix}_{date_str}.csv"));

    let mut writer = csv::Writer::from_path(&filepath)
        .with_context(|| format!("creating {}", filepath.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!("CSV saved: {} ({} rows)", filepath.display(), records.len());
    Ok(filepath)
}
