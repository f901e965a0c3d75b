// src/services/fetcher.rs

//! Spreadsheet export download.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};
use crate::models::{HttpConfig, SheetLocator};
use crate::utils::http;

/// Outcome of a successful download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub url: String,
    pub path: PathBuf,
    pub bytes: usize,
    pub lines: usize,
    /// SHA-256 of the body, hex encoded
    pub sha256: String,
}

impl FetchReport {
    fn new(url: String, path: PathBuf, body: &[u8]) -> Self {
        Self {
            url,
            path,
            bytes: body.len(),
            lines: count_lines(body),
            sha256: hex::encode(Sha256::digest(body)),
        }
    }
}

/// Source of the raw CSV byte store.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Download the export for `sheet` and persist it verbatim at `dest`,
    /// overwriting any existing file.
    async fn fetch(&self, sheet: &SheetLocator, dest: &Path) -> Result<FetchReport>;
}

/// Downloads CSV exports over HTTP.
pub struct GoogleSheetFetcher {
    client: Client,
}

impl GoogleSheetFetcher {
    /// Create a fetcher with a configured client.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
        })
    }
}

#[async_trait]
impl SheetSource for GoogleSheetFetcher {
    async fn fetch(&self, sheet: &SheetLocator, dest: &Path) -> Result<FetchReport> {
        let url = sheet.export_url()?.to_string();
        log::info!("Downloading CSV from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| classify_transport(&url, e))?;

        check_status(&url, response.status())?;

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_transport(&url, e))?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(dest, &body).await?;

        Ok(FetchReport::new(url, dest.to_path_buf(), &body))
    }
}

/// Map a non-success status to the matching error.
fn check_status(url: &str, status: StatusCode) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    let url = url.to_string();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::AccessDenied {
            url,
            status: status.as_u16(),
        }),
        _ => Err(AppError::HttpStatus {
            url,
            status: status.as_u16(),
        }),
    }
}

/// Connect failures and timeouts are connectivity problems; anything else
/// stays an unclassified HTTP error.
fn classify_transport(url: &str, err: reqwest::Error) -> AppError {
    if err.is_connect() || err.is_timeout() {
        AppError::connection(url, err)
    } else {
        AppError::Http(err)
    }
}

/// Number of lines, counting a final line without a trailing newline.
fn count_lines(body: &[u8]) -> usize {
    let newlines = body.iter().filter(|b| **b == b'\n').count();
    match body.last() {
        Some(b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(b""), 0);
        assert_eq!(count_lines(b"a,b\n"), 1);
        assert_eq!(count_lines(b"a,b\n1,2"), 2);
        assert_eq!(count_lines(b"a,b\r\n1,2\r\n"), 2);
    }

    #[test]
    fn test_check_status() {
        let url = "https://docs.google.com/x";
        assert!(check_status(url, StatusCode::OK).is_ok());
        assert!(matches!(
            check_status(url, StatusCode::FORBIDDEN),
            Err(AppError::AccessDenied { status: 403, .. })
        ));
        assert!(matches!(
            check_status(url, StatusCode::UNAUTHORIZED),
            Err(AppError::AccessDenied { status: 401, .. })
        ));
        assert!(matches!(
            check_status(url, StatusCode::NOT_FOUND),
            Err(AppError::HttpStatus { status: 404, .. })
        ));
    }

    #[test]
    fn test_report_digest() {
        let report = FetchReport::new("u".into(), PathBuf::from("x.csv"), b"abc");
        assert_eq!(report.bytes, 3);
        assert_eq!(report.lines, 1);
        assert_eq!(
            report.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
