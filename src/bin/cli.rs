//! gem-sync CLI
//!
//! Downloads the gem sheet as CSV and regenerates the JSON metadata files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gem_sync::{
    error::Result,
    models::SyncConfig,
    pipeline::{self, SyncReport},
    services::GoogleSheetFetcher,
};

/// Sync Google Sheets data and generate JSON metadata files
#[derive(Parser, Debug)]
#[command(
    name = "gem-sync",
    version,
    about = "Sync Google Sheets data and generate JSON metadata files",
    after_help = "Examples:\n  \
        gem-sync\n  \
        gem-sync --skip-download\n  \
        gem-sync --spreadsheet-id <ID> --gid <GID>\n  \
        gem-sync --csv ./custom.csv --output ./custom_json"
)]
struct Cli {
    /// Path to a TOML config file (missing file means built-in defaults)
    #[arg(short, long, default_value = "gem-sync.toml")]
    config: PathBuf,

    /// Google Sheets spreadsheet ID [default: from config]
    #[arg(long)]
    spreadsheet_id: Option<String>,

    /// Google Sheets tab GID [default: from config]
    #[arg(long)]
    gid: Option<String>,

    /// CSV file path [default: metadata/raw_data/gem.csv]
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Output directory for JSON files [default: metadata/json]
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip downloading CSV and use existing file
    #[arg(long)]
    skip_download: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Overlay command-line values on the loaded configuration.
    fn apply_to(&self, config: &mut SyncConfig) {
        if let Some(id) = &self.spreadsheet_id {
            config.sheet.spreadsheet_id = id.clone();
        }
        if let Some(gid) = &self.gid {
            config.sheet.gid = gid.clone();
        }
        if let Some(csv) = &self.csv {
            config.paths.csv_file = csv.clone();
        }
        if let Some(output) = &self.output {
            config.paths.output_dir = output.clone();
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn run(cli: &Cli) -> Result<SyncReport> {
    let mut config = SyncConfig::load_or_default(&cli.config);
    cli.apply_to(&mut config);
    config.validate()?;

    let fetcher = GoogleSheetFetcher::new(&config.http)?;
    pipeline::run_sync(&config, &fetcher, cli.skip_download).await
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli).await {
        Ok(_) => {
            log::info!("Sync completed successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "gem-sync",
            "--spreadsheet-id",
            "sheet-1",
            "--gid",
            "9",
            "--output",
            "out",
            "--skip-download",
        ]);
        let mut config = SyncConfig::default();
        cli.apply_to(&mut config);

        assert!(cli.skip_download);
        assert_eq!(config.sheet.spreadsheet_id, "sheet-1");
        assert_eq!(config.sheet.gid, "9");
        assert_eq!(config.paths.output_dir, PathBuf::from("out"));
        assert_eq!(config.paths.csv_file, SyncConfig::default().paths.csv_file);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
