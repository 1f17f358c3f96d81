use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::DeliveryError;

/// `<prefix>_<YYYY-MM-DD>.html`
#[must_use]
pub fn report_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}_{}.html", date.format("%Y-%m-%d"))
}

/// Write the rendered report into `output_dir`, creating the directory if needed.
///
/// Overwrites a report already written for the same date.
///
/// # Errors
///
/// Returns [`DeliveryError::Io`] if the directory cannot be created or the
/// file cannot be written.
pub async fn write_report(
    output_dir: &Path,
    prefix: &str,
    date: NaiveDate,
    html: &str,
) -> Result<PathBuf, DeliveryError> {
    let path = output_dir.join(report_filename(prefix, date));

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| DeliveryError::Io {
            path: output_dir.display().to_string(),
            source: e,
        })?;

    tokio::fs::write(&path, html)
        .await
        .map_err(|e| DeliveryError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

    Ok(path)
}
