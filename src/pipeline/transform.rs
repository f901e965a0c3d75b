// src/pipeline/transform.rs

//! CSV byte store → JSON documents.

use std::path::Path;

use csv::StringRecord;

use crate::error::{AppError, Result, RowError};
use crate::logging;
use crate::models::{Column, ColumnIndex};
use crate::services::transform_row;
use crate::storage::DocumentStorage;

/// Log a progress line every this many documents.
const PROGRESS_EVERY: usize = 50;

/// A row that was skipped, with its 1-based line in the CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    pub line: u64,
    pub error: RowError,
}

/// Result of one pass over the byte store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformSummary {
    /// Documents written
    pub processed: usize,
    /// Rows rejected with an error
    pub skipped: usize,
    /// Spacer rows with a blank identifier (not errors)
    pub blank_rows: usize,
    pub failures: Vec<RowFailure>,
}

impl TransformSummary {
    fn record_failure(&mut self, line: u64, error: RowError) {
        log::warn!(
            "Skipping row {} (line {}): {}",
            display_id(error.id()),
            line,
            error
        );
        self.skipped += 1;
        self.failures.push(RowFailure { line, error });
    }
}

fn display_id(id: &str) -> &str {
    if id.is_empty() { "unknown" } else { id }
}

/// Convert every row of the CSV at `csv_path` into a document in `storage`.
///
/// Only an unreadable byte store is fatal; row problems are logged, counted
/// and skipped.
pub async fn run_transform(
    csv_path: &Path,
    storage: &dyn DocumentStorage,
) -> Result<TransformSummary> {
    let bytes = tokio::fs::read(csv_path)
        .await
        .map_err(|e| AppError::table_read(csv_path, e))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| AppError::table_read(csv_path, format!("not valid UTF-8: {e}")))?;
    let content = text.strip_prefix('\u{feff}').unwrap_or(&text);

    storage.prepare().await?;

    log::info!("Converting CSV to JSON files...");
    logging::sub_item(&format!("Input: {}", csv_path.display()));
    logging::sub_item(&format!("Output: {}", storage.location()));
    logging::sub_item(&format!(
        "Using only required columns: {}",
        Column::ALL.map(Column::header).join(", ")
    ));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::table_read(csv_path, e))?
        .clone();
    let index = ColumnIndex::from_headers(&headers);
    let missing = index.missing();
    if !headers.is_empty() && !missing.is_empty() {
        log::warn!("Header row is missing columns: {}", missing.join(", "));
    }

    let mut summary = TransformSummary::default();
    let mut record = StringRecord::new();

    while reader
        .read_record(&mut record)
        .map_err(|e| AppError::table_read(csv_path, e))?
    {
        let line = record.position().map_or(0, |p| p.line());

        let (id, document) = match transform_row(&index, &record) {
            Ok(Some(row)) => row,
            Ok(None) => {
                summary.blank_rows += 1;
                continue;
            }
            Err(e) => {
                summary.record_failure(line, e);
                continue;
            }
        };

        match storage.write_document(&id, &document).await {
            Ok(_) => {
                summary.processed += 1;
                if summary.processed % PROGRESS_EVERY == 0 {
                    log::info!("Processed {} files...", summary.processed);
                }
            }
            Err(e) => summary.record_failure(line, e),
        }
    }

    log::info!("Generated {} JSON files", summary.processed);
    if summary.skipped > 0 {
        log::warn!("Skipped {} rows", summary.skipped);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    const HEADER: &str = "ID,名稱,Category,Color,Cut,Carat,Clarity,Rarity,image,animation_url,Notes\n";

    async fn transform(csv: &str) -> (TempDir, Result<TransformSummary>) {
        let tmp = TempDir::new().unwrap();
        let csv_path = tmp.path().join("gem.csv");
        std::fs::write(&csv_path, csv).unwrap();
        let storage = LocalStorage::new(tmp.path().join("json"));
        let result = run_transform(&csv_path, &storage).await;
        (tmp, result)
    }

    #[tokio::test]
    async fn test_three_rows_one_document() {
        let csv = format!(
            "{HEADER}\
             G001,紅寶石,Ruby,#FF0000,Brilliant,3,VS1,Rare,ipfs://i/1,ipfs://a/1,x\n\
             G002,,Ruby,#FF0000,Brilliant,3,VS1,Rare,ipfs://i/2,ipfs://a/2,x\n\
             G003,Gem,Ruby,#FF0000,Brilliant,three,VS1,Rare,ipfs://i/3,ipfs://a/3,x\n"
        );
        let (tmp, result) = transform(&csv).await;
        let summary = result.unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.failures[0].line, 3);
        assert!(matches!(
            summary.failures[1].error,
            RowError::InvalidCarat { ref value, .. } if value == "three"
        ));
        assert!(tmp.path().join("json/G001.json").exists());
        assert!(!tmp.path().join("json/G002.json").exists());
        assert!(!tmp.path().join("json/G003.json").exists());
    }

    #[tokio::test]
    async fn test_spacer_rows_are_not_counted() {
        let csv = format!(
            "{HEADER}\
             ,,,,,,,,,,\n\
             \"  \",Gem,Ruby,,Oval,1,VS1,Rare,i,a,\n\
             G001,Gem,Ruby,,Oval,1,VS1,Rare,i,a,\n"
        );
        let (_tmp, result) = transform(&csv).await;
        let summary = result.unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.blank_rows, 2);
    }

    #[tokio::test]
    async fn test_short_row_counts_missing_column() {
        let csv = format!(
            "{HEADER}\
             G001,Gem,Ruby,#FF0000,Oval\n\
             G002,Gem,Ruby,#FF0000,Oval,1,VS1,Rare,i,a\n"
        );
        let (_tmp, result) = transform(&csv).await;
        let summary = result.unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(
            summary.failures[0].error,
            RowError::MissingColumn {
                id: "G001".to_string(),
                column: "Carat",
            }
        );
    }

    #[tokio::test]
    async fn test_bom_is_stripped() {
        let csv = format!("\u{feff}{HEADER}G001,Gem,Ruby,,Oval,1,VS1,Rare,i,a,\n");
        let (tmp, result) = transform(&csv).await;
        assert_eq!(result.unwrap().processed, 1);
        assert!(tmp.path().join("json/G001.json").exists());
    }

    #[tokio::test]
    async fn test_empty_file_produces_nothing() {
        let (_tmp, result) = transform("").await;
        assert_eq!(result.unwrap(), TransformSummary::default());
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("json"));

        let err = run_transform(&tmp.path().join("missing.csv"), &storage)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TableRead { .. }));
        assert!(!tmp.path().join("json").exists());
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let csv_path = tmp.path().join("gem.csv");
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"G001,\xff\xfe,Ruby,,Oval,1,VS1,Rare,i,a,\n");
        std::fs::write(&csv_path, bytes).unwrap();

        let storage = LocalStorage::new(tmp.path().join("json"));
        let err = run_transform(&csv_path, &storage).await.unwrap_err();
        assert!(matches!(err, AppError::TableRead { .. }));
    }

    #[tokio::test]
    async fn test_rerun_is_byte_identical() {
        let csv = format!("{HEADER}G001,藍寶石,Sapphire,#0000FF,Princess,2,VVS1,Epic,i,a,\n");
        let (tmp, result) = transform(&csv).await;
        result.unwrap();
        let path = tmp.path().join("json/G001.json");
        let first = std::fs::read(&path).unwrap();

        let storage = LocalStorage::new(tmp.path().join("json"));
        run_transform(&tmp.path().join("gem.csv"), &storage)
            .await
            .unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), first);
    }
}
