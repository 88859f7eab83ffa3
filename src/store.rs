//! Persistence for the trained ensemble: one bincode artifact per horizon.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::domain::HORIZONS;
use crate::error::{ForecastError, Result};
use crate::ml::model::{Ensemble, HorizonModel};

/// Filesystem store keyed by horizon index.
///
/// `artifact_path(i)` is deterministic and monotonic in `i`, and the read
/// order of `load` matches the write order of `save` exactly. On top of
/// that, each artifact carries its horizon tag in the metadata, which is
/// validated against the position on load — enumeration order alone is not
/// what binds an artifact to its horizon.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn artifact_path(&self, horizon: u8) -> PathBuf {
        self.dir.join(format!("horizon_{horizon}.bin"))
    }

    /// Whether every expected artifact is present on disk.
    pub fn is_complete(&self) -> bool {
        (1..=HORIZONS as u8).all(|h| self.artifact_path(h).exists())
    }

    /// Persist each horizon model under its own key, creating the storage
    /// directory as needed.
    pub fn save(&self, ensemble: &Ensemble) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| ForecastError::StoreIo {
            path: self.dir.clone(),
            source,
        })?;

        for model in ensemble.models() {
            let path = self.artifact_path(model.horizon());
            let bytes = bincode::serialize(model).map_err(|e| {
                ForecastError::ModelArtifactCorrupt {
                    path: path.clone(),
                    reason: format!("encoding failed: {e}"),
                }
            })?;
            fs::write(&path, bytes).map_err(|source| ForecastError::StoreIo {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "wrote model artifact");
        }

        info!(dir = %self.dir.display(), count = ensemble.len(), "persisted ensemble");
        Ok(())
    }

    /// Reconstruct the ordered ensemble by reading keys 1..6 ascending.
    ///
    /// Any missing or unreadable artifact fails the whole load — a partial
    /// ensemble is never returned. Decode failures are reported as corrupt,
    /// distinct from not-found; a horizon tag that disagrees with its
    /// position is an ordering violation.
    pub fn load(&self) -> Result<Ensemble> {
        let mut models = Vec::with_capacity(HORIZONS);
        for horizon in 1..=HORIZONS as u8 {
            let path = self.artifact_path(horizon);
            let bytes = fs::read(&path).map_err(|_| ForecastError::ModelArtifactNotFound {
                path: path.clone(),
            })?;
            let model: HorizonModel = bincode::deserialize(&bytes).map_err(|e| {
                ForecastError::ModelArtifactCorrupt {
                    path: path.clone(),
                    reason: e.to_string(),
                }
            })?;
            models.push(model);
        }
        Ensemble::new(models)
    }
}

/// Load-once cache over the store.
///
/// The slot is mutex-guarded so that concurrent first loads collapse into a
/// single disk read; after that every caller shares the same immutable
/// `Arc<Ensemble>`. A changed artifact on disk is only picked up after an
/// explicit [`EnsembleCache::invalidate`] or a process restart.
pub struct EnsembleCache {
    store: ModelStore,
    slot: Mutex<Option<Arc<Ensemble>>>,
}

impl EnsembleCache {
    pub fn new(store: ModelStore) -> Self {
        Self {
            store,
            slot: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    pub fn get_or_load(&self) -> Result<Arc<Ensemble>> {
        let mut slot = self.slot.lock();
        if let Some(ensemble) = slot.as_ref() {
            return Ok(Arc::clone(ensemble));
        }
        let ensemble = Arc::new(self.store.load()?);
        *slot = Some(Arc::clone(&ensemble));
        info!("ensemble loaded into serving cache");
        Ok(ensemble)
    }

    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }
}
