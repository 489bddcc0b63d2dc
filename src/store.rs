// =============================================================================
// store.rs - Persisted key-value preferences
// =============================================================================

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

// =============================================================================
// STORE - Préférences persistées
// STORE - Persisted preferences
// =============================================================================

/// Store clé/valeur sauvegardé en JSON
/// Key/value store saved as JSON
///
/// Defaults are registered in memory and shadowed by stored values; they are
/// never written to disk. Every `set`/`remove` writes the file back.
#[derive(Debug, Default)]
pub struct Store {
    /// Fichier de sauvegarde, `None` pour un store en mémoire
    /// Backing file, `None` for an in-memory store
    path: Option<PathBuf>,

    /// Valeurs modifiées par l'utilisateur
    /// Values changed by the user
    values: Map<String, Value>,

    /// Valeurs par défaut enregistrées au démarrage
    /// Defaults registered at startup
    defaults: Map<String, Value>,
}

/// Store partagé entre les composants (thread UI uniquement)
/// Store shared between components (UI thread only)
pub type SharedStore = Rc<RefCell<Store>>;

impl Store {
    /// Opens the store at `path`. A missing file yields an empty store, a
    /// malformed one is logged and ignored (it gets replaced on next write).
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            match Self::read(&path) {
                Ok(values) => {
                    tracing::info!("Loaded preferences from {:?}", path);
                    values
                }
                Err(e) => {
                    tracing::warn!("Failed to read preferences {:?}: {}, using defaults", path, e);
                    Map::new()
                }
            }
        } else {
            tracing::debug!("No preferences at {:?}, using defaults", path);
            Map::new()
        };

        Self {
            path: Some(path),
            values,
            defaults: Map::new(),
        }
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedStore {
        Rc::new(RefCell::new(self))
    }

    fn read(path: &Path) -> Result<Map<String, Value>> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Registers a default value, replacing any previous default for `key`
    pub fn register_default<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.defaults.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Stored value, else the registered default. A cleared key yields
    /// `None`; a stored value that no longer deserializes as `T` is ignored
    /// in favor of the default.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.values.get(key) {
            Some(Value::Null) => return None,
            Some(value) => match serde_json::from_value(value.clone()) {
                Ok(v) => return Some(v),
                Err(e) => tracing::warn!("Ignoring malformed preference {}: {}", key, e),
            },
            None => {}
        }
        let value = self.defaults.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.values.insert(key.to_string(), serde_json::to_value(value)?);
        self.save()
    }

    /// Drops the stored value; the default (if any) becomes visible again
    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    /// Stores an explicit `null`, hiding the default
    pub fn clear(&mut self, key: &str) -> Result<()> {
        self.values.insert(key.to_string(), Value::Null);
        self.save()
    }

    pub fn is_cleared(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(Value::Null))
    }

    /// Writes the stored values to disk (temp file + rename)
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.values)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, path)?;
        tracing::debug!("Saved preferences to {:?}", path);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
