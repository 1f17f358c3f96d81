//! Report delivery sinks.
//!
//! Each sink is best-effort: errors are logged and turned into
//! [`DeliveryOutcome::Failed`] so one sink never prevents the other.

mod email;
mod file;

pub use email::{build_message, send_report};
pub use file::{report_filename, write_report};

use std::path::Path;

use chrono::NaiveDate;
use fitwatch_core::EmailSettings;

use crate::types::DeliveryOutcome;

/// Write the report file, logging and absorbing any error.
pub async fn deliver_file(
    output_dir: &Path,
    prefix: &str,
    date: NaiveDate,
    html: &str,
) -> DeliveryOutcome {
    match write_report(output_dir, prefix, date, html).await {
        Ok(path) => {
            tracing::info!(path = %path.display(), "report saved");
            DeliveryOutcome::Delivered(path.display().to_string())
        }
        Err(e) => {
            tracing::error!(sink = "file", error = %e, "failed to save report");
            DeliveryOutcome::Failed(e.to_string())
        }
    }
}

/// Email the report, logging and absorbing any error.
pub async fn deliver_email(settings: &EmailSettings, subject: &str, html: &str) -> DeliveryOutcome {
    match send_report(settings, subject, html).await {
        Ok(DeliveryOutcome::Skipped(reason)) => {
            tracing::warn!(sink = "email", %reason, "skipping email");
            DeliveryOutcome::Skipped(reason)
        }
        Ok(outcome) => {
            tracing::info!(sink = "email", %outcome, "email sent");
            outcome
        }
        Err(e) => {
            tracing::error!(sink = "email", error = %e, "failed to send email");
            DeliveryOutcome::Failed(e.to_string())
        }
    }
}
