//! Image fetch batch: downloads manifest images into the gallery folders
//!
//! Downloads run one after another. A row whose destination file already
//! exists is skipped without touching the network, and a failed row is
//! logged and left behind while the batch moves on.

use crate::constants::{FETCH_TIMEOUT, FETCH_USER_AGENT};
use crate::error::FetchError;
use crate::gallery::{image_dir, image_path};
use crate::types::{ImageCategory, ManifestRow};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One manifest row resolved to its destination on disk
#[derive(Debug, Clone, PartialEq)]
pub struct FetchJob {
    pub name: String,
    pub url: String,
    pub dest: PathBuf,
}

/// Status of one job, as shown in the progress log
#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    Pending,
    Downloading,
    Complete,
    Skipped,
    Failed(String),
}

/// Shared progress for a batch started from the dashboard
#[derive(Debug, Default)]
pub struct FetchState {
    pub jobs: Vec<FetchJob>,
    pub statuses: HashMap<usize, FetchStatus>,
    pub running: bool,
    pub report: Option<FetchReport>,
}

impl FetchState {
    pub fn finished_count(&self) -> usize {
        self.statuses
            .values()
            .filter(|s| !matches!(s, FetchStatus::Pending | FetchStatus::Downloading))
            .count()
    }
}

/// Totals for a finished batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchReport {
    pub downloaded: usize,
    pub skipped: usize,
    /// (name, error) per failed row
    pub failed: Vec<(String, String)>,
    /// Network requests issued
    pub attempted: usize,
}

/// Resolve every manifest row to a job using the gallery naming convention.
pub fn plan(rows: &[ManifestRow], assets_root: &Path) -> Vec<FetchJob> {
    rows.iter()
        .map(|row| FetchJob {
            name: row.name.clone(),
            url: row.image_url.clone(),
            dest: image_path(assets_root, row.category(), &row.name),
        })
        .collect()
}

/// Create the three category folders.
pub fn prepare_dirs(assets_root: &Path) -> std::io::Result<()> {
    for category in ImageCategory::ALL {
        std::fs::create_dir_all(image_dir(assets_root, category))?;
    }
    Ok(())
}

pub fn build_client() -> Result<reqwest::Client, FetchError> {
    Ok(reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(FETCH_USER_AGENT)
        .build()?)
}

/// `<dest>.part`, the file a download is written to before it is complete
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Write `bytes` next to `dest` and move them into place once fully written.
/// A failed write leaves nothing at `dest`.
async fn write_file(dest: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let part = partial_path(dest);
    let written = match tokio::fs::write(&part, bytes).await {
        Ok(()) => tokio::fs::rename(&part, dest).await,
        Err(e) => Err(e),
    };
    if written.is_err() {
        let _ = tokio::fs::remove_file(&part).await;
    }
    written
}

async fn download(client: &reqwest::Client, job: &FetchJob) -> Result<(), FetchError> {
    let response = client.get(&job.url).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }
    let bytes = response.bytes().await?;
    write_file(&job.dest, &bytes).await?;
    Ok(())
}

/// Fetch one job. Never returns an error; failures become [`FetchStatus::Failed`].
///
/// `on_request` runs right before the network request goes out. It is not
/// called for a job that is skipped.
pub async fn fetch_one(client: &reqwest::Client, job: &FetchJob, on_request: impl FnOnce()) -> FetchStatus {
    if job.dest.exists() {
        debug!(name = %job.name, "Image already present, skipping");
        return FetchStatus::Skipped;
    }
    on_request();
    info!(name = %job.name, "Downloading");
    match download(client, job).await {
        Ok(()) => {
            info!(name = %job.name, path = %job.dest.display(), "Downloaded");
            FetchStatus::Complete
        }
        Err(e) => {
            warn!(name = %job.name, url = %job.url, error = %e, "Failed to download");
            FetchStatus::Failed(e.to_string())
        }
    }
}

/// Run every job in order. `on_status` sees each status change.
pub async fn run_batch<F>(client: &reqwest::Client, jobs: &[FetchJob], mut on_status: F) -> FetchReport
where
    F: FnMut(usize, &FetchStatus),
{
    let mut report = FetchReport::default();

    for (idx, job) in jobs.iter().enumerate() {
        let status = fetch_one(client, job, || {
            report.attempted += 1;
            on_status(idx, &FetchStatus::Downloading);
        })
        .await;
        match &status {
            FetchStatus::Complete => report.downloaded += 1,
            FetchStatus::Skipped => report.skipped += 1,
            FetchStatus::Failed(e) => report.failed.push((job.name.clone(), e.clone())),
            FetchStatus::Pending | FetchStatus::Downloading => {}
        }
        on_status(idx, &status);
    }

    info!(
        downloaded = report.downloaded,
        skipped = report.skipped,
        failed = report.failed.len(),
        "Image fetch finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, kind: &str) -> ManifestRow {
        ManifestRow {
            name: name.into(),
            kind: kind.into(),
            image_url: format!("https://example.org/{}.jpg", name),
        }
    }

    #[test]
    fn plan_uses_gallery_paths() {
        let root = Path::new("/tmp/explorer");
        let jobs = plan(
            &[row("Taj Mahal", "heritage"), row("Holi", "event"), row("Noh", "art")],
            root,
        );
        assert_eq!(jobs[0].dest, root.join("assets/images/heritage/taj_mahal.jpg"));
        assert_eq!(jobs[1].dest, root.join("assets/images/events/holi.jpg"));
        assert_eq!(jobs[2].dest, root.join("assets/images/art/noh.jpg"));
    }

    #[test]
    fn prepare_dirs_creates_category_folders() {
        let dir = tempfile::tempdir().unwrap();
        prepare_dirs(dir.path()).unwrap();
        for folder in ["heritage", "events", "art"] {
            assert!(dir.path().join("assets/images").join(folder).is_dir());
        }
    }

    #[tokio::test]
    async fn finished_write_replaces_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("taj_mahal.jpg");

        write_file(&dest, b"image bytes").await.unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"image bytes");
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn failed_write_leaves_no_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("taj_mahal.jpg");
        // A directory in the way makes the partial write fail
        std::fs::create_dir(partial_path(&dest)).unwrap();

        assert!(write_file(&dest, b"image bytes").await.is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn finished_count_ignores_in_flight() {
        let mut state = FetchState::default();
        state.statuses.insert(0, FetchStatus::Complete);
        state.statuses.insert(1, FetchStatus::Downloading);
        state.statuses.insert(2, FetchStatus::Failed("HTTP 404".into()));
        state.statuses.insert(3, FetchStatus::Pending);
        assert_eq!(state.finished_count(), 2);
    }
}
