// src/pipeline/sync.rs

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{AppError, Result};
use crate::logging;
use crate::models::SyncConfig;
use crate::services::{FetchReport, SheetSource};
use crate::storage::LocalStorage;

use super::transform::{TransformSummary, run_transform};

/// Outcome of a full sync run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// `None` when the download was skipped
    pub fetch: Option<FetchReport>,
    pub transform: TransformSummary,
}

impl SyncReport {
    pub fn elapsed(&self) -> TimeDelta {
        self.finished_at - self.started_at
    }
}

/// Run the full pipeline: download the CSV (unless skipped), then convert it.
///
/// With `skip_download` the CSV must already exist; otherwise nothing runs.
/// A failed download aborts before any conversion so documents are never
/// regenerated from a stale CSV.
pub async fn run_sync(
    config: &SyncConfig,
    source: &dyn SheetSource,
    skip_download: bool,
) -> Result<SyncReport> {
    let started_at = Utc::now();
    let csv_path = &config.paths.csv_file;

    logging::header("Syncing Google Sheets Data");

    let fetch = if skip_download {
        if !tokio::fs::try_exists(csv_path).await.unwrap_or(false) {
            return Err(AppError::ByteStoreMissing(csv_path.clone()));
        }
        logging::step(
            1,
            2,
            &format!("Skipping download, using existing CSV: {}", csv_path.display()),
        );
        None
    } else {
        logging::step(1, 2, "Download - Fetching CSV from Google Sheets");
        let report = source
            .fetch(&config.sheet, csv_path)
            .await
            .inspect_err(|_| log::error!("Failed to download CSV. Aborting."))?;

        log::info!("Successfully downloaded CSV file");
        logging::sub_item(&format!("Saved to: {}", report.path.display()));
        logging::sub_item(&format!("File size: {} bytes", report.bytes));
        logging::sub_item(&format!("Total lines: {}", report.lines));
        logging::sub_item(&format!("SHA-256: {}", report.sha256));
        Some(report)
    };

    logging::step(2, 2, "Convert - Generating JSON metadata files");
    let storage = LocalStorage::new(&config.paths.output_dir);
    let transform = run_transform(csv_path, &storage)
        .await
        .inspect_err(|_| log::error!("Failed to generate JSON files."))?;

    let report = SyncReport {
        started_at,
        finished_at: Utc::now(),
        fetch,
        transform,
    };

    let mut items = vec![("Generated", report.transform.processed.to_string())];
    if report.transform.skipped > 0 {
        items.push(("Skipped", report.transform.skipped.to_string()));
    }
    items.push(("Output directory", config.paths.output_dir.display().to_string()));
    items.push((
        "Elapsed",
        format!("{} ms", report.elapsed().num_milliseconds()),
    ));
    logging::separator();
    logging::summary("Sync Results", &items);

    Ok(report)
}
