//! Downloads every image listed in `data/image_urls.csv` into `assets/images/`

use cultural_explorer::constants::{DEFAULT_ASSETS_ROOT, DEFAULT_DATA_DIR};
use cultural_explorer::data::load_csv;
use cultural_explorer::fetcher::{self, FetchStatus};
use cultural_explorer::types::{CsvRecord, ManifestRow};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    let assets_root = Path::new(DEFAULT_ASSETS_ROOT);
    let manifest_path = Path::new(DEFAULT_DATA_DIR).join(ManifestRow::FILE_NAME);

    if let Err(e) = fetcher::prepare_dirs(assets_root) {
        error!(error = %e, "Failed to create image folders");
        return ExitCode::FAILURE;
    }

    let rows: Vec<ManifestRow> = match load_csv(&manifest_path) {
        Ok(rows) => rows,
        Err(e) => {
            error!(error = %e, "Failed to read image manifest");
            return ExitCode::FAILURE;
        }
    };

    let client = match fetcher::build_client() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let jobs = fetcher::plan(&rows, assets_root);
    let report = fetcher::run_batch(&client, &jobs, |idx, status| match status {
        FetchStatus::Complete => info!("Successfully downloaded {}", jobs[idx].name),
        FetchStatus::Failed(_) => warn!("Failed to download {}", jobs[idx].name),
        _ => {}
    })
    .await;

    info!(
        downloaded = report.downloaded,
        skipped = report.skipped,
        failed = report.failed.len(),
        "Download process completed!"
    );
    ExitCode::SUCCESS
}
