use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use once_cell::sync::{Lazy, OnceCell};

use super::error::LoadError;
use super::loader;
use super::model::Dataset;

static REGISTRY: Lazy<DatasetRegistry> = Lazy::new(DatasetRegistry::default);

/// The process-wide registry.
pub fn registry() -> &'static DatasetRegistry {
    &REGISTRY
}

/// Load `path` once per process and share the result.
pub fn load_cached(path: &Path) -> Result<Arc<Dataset>, LoadError> {
    registry().get_or_load(path)
}

type Slot = Arc<OnceCell<Arc<Dataset>>>;

/// Memoizes loaded datasets by source path.
///
/// Entries are never evicted: the source file is assumed not to change
/// while the process runs. Each path has its own init cell, so concurrent
/// first callers read the file once and callers for other paths are not
/// blocked meanwhile. Failed loads leave the cell empty.
#[derive(Default)]
pub struct DatasetRegistry {
    slots: Mutex<HashMap<PathBuf, Slot>>,
}

impl DatasetRegistry {
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        let slot = self.slot(path);
        if let Some(dataset) = slot.get() {
            log::debug!("Dataset cache hit for {}", path.display());
            return Ok(Arc::clone(dataset));
        }
        let dataset = slot.get_or_try_init(|| loader::load(path).map(Arc::new))?;
        Ok(Arc::clone(dataset))
    }

    pub fn is_cached(&self, path: &Path) -> bool {
        self.lock()
            .get(path)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Number of successfully loaded datasets.
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, path: &Path) -> Slot {
        Arc::clone(self.lock().entry(path.to_path_buf()).or_default())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Slot>> {
        // Slots are only ever inserted, so a poisoned map is still consistent.
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
