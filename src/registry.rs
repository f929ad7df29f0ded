//! Persisted directory registry
//!
//! The only state heft keeps between invocations: a JSON file with the
//! list of registered project directories.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("registry {path} is not valid JSON: {message}")]
    Malformed { path: PathBuf, message: String },
    #[error("failed to write registry {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    pub directories: Vec<PathBuf>,
}

impl Registry {
    /// Resolves where the registry lives: `$HEFT_REGISTRY` override first,
    /// then the per-user config directory, then the working directory.
    pub fn location() -> PathBuf {
        if let Ok(path) = std::env::var("HEFT_REGISTRY") {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|dir| dir.join("heft").join("registry.json"))
            .unwrap_or_else(|| PathBuf::from(".heft-registry.json"))
    }

    pub fn try_load(path: &Path) -> Result<Self, RegistryError> {
        let content = fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| RegistryError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Loads the registry, degrading to an empty one when the file is
    /// missing or unreadable. A malformed file is worth a warning; a file
    /// that simply does not exist yet is not.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(registry) => registry,
            Err(RegistryError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            Err(e) => {
                log::warn!("{}, starting with an empty registry", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let write_err = |source| RegistryError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| RegistryError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?;
        fs::write(path, json).map_err(write_err)
    }

    /// Registers a directory. Paths are canonicalized before storage so
    /// `./proj` and `/home/u/proj` do not both end up in the list.
    /// Returns false when the directory was already registered.
    pub fn add(&mut self, path: PathBuf) -> bool {
        let canonical = fs::canonicalize(&path).unwrap_or(path);
        if self.directories.contains(&canonical) {
            return false;
        }
        self.directories.push(canonical);
        true
    }

    /// Unregisters a directory. Returns false when it was not registered.
    pub fn remove(&mut self, path: &Path) -> bool {
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let before = self.directories.len();
        self.directories
            .retain(|dir| dir != &canonical && dir != path);
        self.directories.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }
}
