//! Search history persisted as a single pretty-printed JSON array.
//!
//! Every mutation rewrites the whole document through a temp file and a
//! rename, so readers never observe a partially written file. Mutations
//! within one process are serialized by an async mutex; separate processes
//! sharing the file are not coordinated.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::models::City;

#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty history document if none exists yet.
    pub async fn ensure_exists(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|e| self.read_error(e))?;
        if !exists {
            tracing::info!("Creating empty search history at {}", self.path.display());
            self.write(&[]).await?;
        }
        Ok(())
    }

    /// Reads and parses the full list of cities.
    pub async fn list(&self) -> Result<Vec<City>> {
        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.read_error(e))?;
        serde_json::from_str(&text).map_err(|e| self.read_error(e))
    }

    /// Appends `name` under the next free id and returns the stored entry.
    pub async fn append(&self, name: &str) -> Result<City> {
        let _guard = self.write_lock.lock().await;
        let mut cities = self.list().await?;
        let id = next_id(&cities).ok_or_else(|| self.write_error("no ids left to allocate"))?;
        let city = City::new(name, id);
        tracing::info!("Adding {} to search history as id {}", city.name, city.id);
        cities.push(city.clone());
        self.write(&cities).await?;
        Ok(city)
    }

    /// Removes every entry with `id`. Unknown ids leave the list unchanged.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let cities = self.list().await?;
        let before = cities.len();
        let kept: Vec<City> = cities.into_iter().filter(|c| c.id != id).collect();
        tracing::info!(
            "Removing id {} from search history ({} entries dropped)",
            id,
            before - kept.len()
        );
        self.write(&kept).await
    }

    async fn write(&self, cities: &[City]) -> Result<()> {
        let json = serde_json::to_string_pretty(cities).map_err(|e| self.write_error(e))?;

        let mut temp = OsString::from(self.path.as_os_str());
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        fs::write(&temp, json)
            .await
            .map_err(|e| self.write_error(e))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.write_error(e))?;
        tracing::debug!("Wrote {} cities to {}", cities.len(), self.path.display());
        Ok(())
    }

    fn read_error(&self, reason: impl ToString) -> Error {
        Error::StorageRead {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn write_error(&self, reason: impl ToString) -> Error {
        Error::StorageWrite {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

/// One past the larger of the list length and the largest numeric id, so
/// an append after a removal never reuses an id still in the list.
/// `None` once the largest id is `u64::MAX`.
fn next_id(cities: &[City]) -> Option<String> {
    let largest = cities
        .iter()
        .filter_map(|c| c.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    largest
        .max(cities.len() as u64)
        .checked_add(1)
        .map(|id| id.to_string())
}
