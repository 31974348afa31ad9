//! Keyed settings presets persisted as one JSON file.
//!
//! The file holds a JSON object mapping preset id to its settings snapshot.
//! Every operation re-reads the file, so several stores (or processes) on the
//! same path see each other's writes.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use wave_core::WaveSettings;

/// All presets, ordered by id.
pub type PresetList = BTreeMap<String, WaveSettings>;

/// Preset storage backed by a JSON file.
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    /// Open the store at `path`.
    ///
    /// A missing file, or one that does not parse as a preset list, is
    /// replaced by an empty list.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let store = Self { path: path.into() };
        if let Err(e) = store.fetch_list() {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("preset file {} unreadable, starting empty: {e}", store.path.display());
            }
            store.save_list(&PresetList::new())?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every preset from disk.
    pub fn fetch_list(&self) -> io::Result<PresetList> {
        let json = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Overwrite the file with `list`.
    pub fn save_list(&self, list: &PresetList) -> io::Result<()> {
        let json = serde_json::to_string_pretty(list)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, json)
    }

    pub fn get(&self, id: &str) -> io::Result<Option<WaveSettings>> {
        Ok(self.fetch_list()?.remove(id))
    }

    /// Insert or replace the preset under `settings.id`; returns the updated list.
    pub fn save(&self, settings: &WaveSettings) -> io::Result<PresetList> {
        let mut list = self.fetch_list()?;
        list.insert(settings.id.clone(), settings.clone());
        self.save_list(&list)?;
        log::info!("saved preset '{}' ({})", settings.name, settings.id);
        Ok(list)
    }

    /// Remove the preset with `id`, if any; returns the updated list.
    pub fn delete(&self, id: &str) -> io::Result<PresetList> {
        let mut list = self.fetch_list()?;
        if list.remove(id).is_some() {
            self.save_list(&list)?;
            log::info!("deleted preset {id}");
        }
        Ok(list)
    }

    /// Smallest positive integer id not yet taken, as a string.
    pub fn next_id(&self) -> io::Result<String> {
        let list = self.fetch_list()?;
        let next = (1u64..)
            .find(|n| !list.contains_key(&n.to_string()))
            .unwrap_or(u64::MAX);
        Ok(next.to_string())
    }
}
