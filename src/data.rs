//! Dataset loading with a per-path, process-lifetime cache

use crate::error::LoadError;
use crate::types::{ArtForm, CsvRecord, CulturalEvent, HeritageSite};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Read every row of a dataset CSV into typed records.
pub fn load_csv<T: CsvRecord>(path: &Path) -> Result<Vec<T>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| LoadError::from_csv(path.to_path_buf(), e))?;

    let rows = reader
        .deserialize::<T>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LoadError::from_csv(path.to_path_buf(), e))?;

    info!(path = %path.display(), rows = rows.len(), "Dataset loaded");
    Ok(rows)
}

/// Memoized loads keyed by file path. Successful loads are kept until the
/// process exits; failures are returned but not stored.
pub struct LoadCache<T> {
    entries: HashMap<PathBuf, Arc<Vec<T>>>,
}

impl<T> Default for LoadCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: CsvRecord> LoadCache<T> {
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Vec<T>>, LoadError> {
        self.get_or_load_with(path, load_csv::<T>)
    }

    pub fn get_or_load_with<F>(&mut self, path: &Path, load: F) -> Result<Arc<Vec<T>>, LoadError>
    where
        F: FnOnce(&Path) -> Result<Vec<T>, LoadError>,
    {
        if let Some(rows) = self.entries.get(path) {
            return Ok(rows.clone());
        }
        let rows = Arc::new(load(path)?);
        debug!(path = %path.display(), "Caching dataset");
        self.entries.insert(path.to_path_buf(), rows.clone());
        Ok(rows)
    }
}

/// The three dashboard datasets, each loaded lazily from `data_dir`.
pub struct Datasets {
    data_dir: PathBuf,
    heritage: LoadCache<HeritageSite>,
    events: LoadCache<CulturalEvent>,
    art: LoadCache<ArtForm>,
}

impl Datasets {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            heritage: LoadCache::default(),
            events: LoadCache::default(),
            art: LoadCache::default(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Point at another data folder. Paths already loaded stay cached.
    pub fn set_data_dir(&mut self, data_dir: impl Into<PathBuf>) {
        self.data_dir = data_dir.into();
    }

    pub fn path_of<T: CsvRecord>(&self) -> PathBuf {
        self.data_dir.join(T::FILE_NAME)
    }

    pub fn heritage(&mut self) -> Result<Arc<Vec<HeritageSite>>, LoadError> {
        let path = self.path_of::<HeritageSite>();
        self.heritage.get_or_load(&path)
    }

    pub fn events(&mut self) -> Result<Arc<Vec<CulturalEvent>>, LoadError> {
        let path = self.path_of::<CulturalEvent>();
        self.events.get_or_load(&path)
    }

    pub fn art(&mut self) -> Result<Arc<Vec<ArtForm>>, LoadError> {
        let path = self.path_of::<ArtForm>();
        self.art.get_or_load(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::cell::Cell;

    const EVENTS: &str = "Name,Country,Type,Location,Start_Date,End_Date,Description\n\
        Carnival,Brazil,Festival,Rio de Janeiro,2024-02-09,2024-02-14,Street parades\n\
        Diwali,India,Religious,Nationwide,2024-11-01 00:00:00,2024-11-05,Festival of lights\n";

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn loads_events_with_parsed_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "cultural_events.csv", EVENTS);

        let rows: Vec<CulturalEvent> = load_csv(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Carnival");
        assert_eq!(rows[1].start_date, NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv::<ArtForm>(&dir.path().join("art_forms.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "art_forms.csv",
            "Name,Region,Category,Time_Period,Popularity,Description\n\
             Kabuki,Japan,Theatre,Edo,very popular,Stylised drama\n",
        );
        match load_csv::<ArtForm>(&path).unwrap_err() {
            LoadError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cache_loads_each_path_once() {
        let calls = Cell::new(0);
        let mut cache: LoadCache<ArtForm> = LoadCache::default();
        let path = Path::new("art_forms.csv");
        let load = |_: &Path| {
            calls.set(calls.get() + 1);
            Ok(vec![])
        };

        cache.get_or_load_with(path, load).unwrap();
        cache.get_or_load_with(path, load).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn cache_does_not_keep_failures() {
        let dir = tempfile::tempdir().unwrap();
        let mut datasets = Datasets::new(dir.path());
        assert!(datasets.events().is_err());

        write(dir.path(), "cultural_events.csv", EVENTS);
        assert_eq!(datasets.events().unwrap().len(), 2);
    }
}
