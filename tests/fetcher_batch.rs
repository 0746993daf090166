//! Image fetch batch against a local HTTP stub

use cultural_explorer::fetcher::{self, FetchStatus};
use cultural_explorer::types::ManifestRow;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const BODY: &[u8] = b"\xFF\xD8\xFF\xE0fake-jpeg";

/// Serves `BODY` for any path except `/missing*`, which gets a 404, and
/// `/truncated*`, which promises more bytes than it sends.
async fn spawn_stub() -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut read = 0;
                while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf[read..]).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => read += n,
                    }
                }
                let request = String::from_utf8_lossy(&buf[..read]);
                let response = if request.starts_with("GET /missing") {
                    b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec()
                } else if request.starts_with("GET /truncated") {
                    let mut r = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        BODY.len() * 10
                    )
                    .into_bytes();
                    r.extend_from_slice(BODY);
                    r
                } else {
                    let mut r = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        BODY.len()
                    )
                    .into_bytes();
                    r.extend_from_slice(BODY);
                    r
                };
                let _ = socket.write_all(&response).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, hits)
}

fn row(name: &str, kind: &str, url: String) -> ManifestRow {
    ManifestRow {
        name: name.into(),
        kind: kind.into(),
        image_url: url,
    }
}

fn manifest(addr: SocketAddr) -> Vec<ManifestRow> {
    vec![
        row("Great Wall of China", "heritage", format!("http://{addr}/wall.jpg")),
        row("Holi Festival", "event", format!("http://{addr}/holi.jpg")),
        row("Kathakali", "art", format!("http://{addr}/kathakali.jpg")),
    ]
}

#[tokio::test]
async fn downloads_then_skips_on_second_run() {
    let (addr, hits) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    fetcher::prepare_dirs(dir.path()).unwrap();

    let client = fetcher::build_client().unwrap();
    let jobs = fetcher::plan(&manifest(addr), dir.path());

    let mut started = 0;
    let first = fetcher::run_batch(&client, &jobs, |_, status| {
        if *status == FetchStatus::Downloading {
            started += 1;
        }
    })
    .await;
    assert_eq!(first.downloaded, 3);
    assert!(first.failed.is_empty());
    assert_eq!(first.attempted, 3);
    assert_eq!(started, 3);
    assert_eq!(hits.load(Ordering::SeqCst), 3);

    let saved = dir.path().join("assets/images/heritage/great_wall_of_china.jpg");
    assert_eq!(std::fs::read(&saved).unwrap(), BODY);
    assert!(dir.path().join("assets/images/events/holi_festival.jpg").exists());
    assert!(dir.path().join("assets/images/art/kathakali.jpg").exists());

    let mut second_statuses = Vec::new();
    let second = fetcher::run_batch(&client, &jobs, |_, status| second_statuses.push(status.clone())).await;
    assert_eq!(second.skipped, 3);
    assert_eq!(second.attempted, 0);
    assert_eq!(second_statuses, vec![FetchStatus::Skipped; 3]);
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn cut_off_download_is_retried_next_run() {
    let (addr, hits) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    fetcher::prepare_dirs(dir.path()).unwrap();

    let rows = vec![row("Angkor Wat", "heritage", format!("http://{addr}/truncated.jpg"))];
    let client = fetcher::build_client().unwrap();
    let jobs = fetcher::plan(&rows, dir.path());
    let folder = dir.path().join("assets/images/heritage");

    let first = fetcher::run_batch(&client, &jobs, |_, _| {}).await;
    assert_eq!(first.failed.len(), 1);
    assert!(!jobs[0].dest.exists());
    assert_eq!(std::fs::read_dir(&folder).unwrap().count(), 0);

    let second = fetcher::run_batch(&client, &jobs, |_, _| {}).await;
    assert_eq!(second.attempted, 1);
    assert_eq!(second.skipped, 0);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failures_do_not_stop_the_batch() {
    let (addr, _hits) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    fetcher::prepare_dirs(dir.path()).unwrap();

    let rows = vec![
        row("Unreachable", "heritage", "http://127.0.0.1:1/nowhere.jpg".to_string()),
        row("Gone", "event", format!("http://{addr}/missing.jpg")),
        row("Noh Theatre", "art", format!("http://{addr}/noh.jpg")),
    ];
    let client = fetcher::build_client().unwrap();
    let jobs = fetcher::plan(&rows, dir.path());

    let mut seen = Vec::new();
    let report = fetcher::run_batch(&client, &jobs, |idx, status| seen.push((idx, status.clone()))).await;

    assert_eq!(report.downloaded, 1);
    assert_eq!(report.attempted, 3);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.failed[0].0, "Unreachable");
    assert_eq!(report.failed[1], ("Gone".to_string(), "HTTP 404 Not Found".to_string()));
    assert!(!Path::new(&jobs[0].dest).exists());
    assert!(!Path::new(&jobs[1].dest).exists());
    assert!(jobs[2].dest.exists());
    assert_eq!(seen.last(), Some(&(2, FetchStatus::Complete)));
}
