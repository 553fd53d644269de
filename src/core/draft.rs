//! Durable storage for the composer draft.
//!
//! The draft lives in a tiny TOML document holding a single slot keyed
//! [`DRAFT_SLOT_KEY`](crate::core::constants::DRAFT_SLOT_KEY). Writes are
//! last-writer-wins and atomic (temp file + rename), so a crash mid-write
//! never corrupts an existing draft.

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

#[derive(Debug)]
pub enum DraftStoreError {
    /// Failed to read the draft file from disk.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The draft file exists but is not valid TOML.
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Failed to write the draft file.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for DraftStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftStoreError::Read { path, source } => {
                write!(f, "Failed to read draft at {}: {}", path.display(), source)
            }
            DraftStoreError::Parse { path, source } => {
                write!(f, "Failed to parse draft at {}: {}", path.display(), source)
            }
            DraftStoreError::Write { path, source } => {
                write!(f, "Failed to write draft at {}: {}", path.display(), source)
            }
        }
    }
}

impl StdError for DraftStoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            DraftStoreError::Read { source, .. } => Some(source),
            DraftStoreError::Write { source, .. } => Some(source),
            DraftStoreError::Parse { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DraftSlots {
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<String>,
}

/// File-backed single-slot draft store.
#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    /// Store under the platform config directory.
    pub fn new() -> Self {
        let proj_dirs = ProjectDirs::from("org", "plume", "plume")
            .expect("Failed to determine config directory");
        Self {
            path: proj_dirs.config_dir().join("draft.toml"),
        }
    }

    /// Store at an explicit path. Used by tests and embedders that manage
    /// their own state directory.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored draft, if any. A missing file is an empty slot, not
    /// an error.
    pub fn load(&self) -> Result<Option<String>, DraftStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).map_err(|source| DraftStoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let slots: DraftSlots =
            toml::from_str(&contents).map_err(|source| DraftStoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(slots.input)
    }

    pub fn save(&self, text: &str) -> Result<(), DraftStoreError> {
        self.write_slots(&DraftSlots {
            input: Some(text.to_string()),
        })
    }

    pub fn clear(&self) -> Result<(), DraftStoreError> {
        self.write_slots(&DraftSlots::default())
    }

    fn write_slots(&self, slots: &DraftSlots) -> Result<(), DraftStoreError> {
        let write_err = |source: std::io::Error| DraftStoreError::Write {
            path: self.path.clone(),
            source,
        };

        let parent = self.path.parent().filter(|dir| !dir.as_os_str().is_empty());
        if let Some(dir) = parent {
            fs::create_dir_all(dir).map_err(write_err)?;
        }

        let contents = toml::to_string_pretty(slots).map_err(|source| DraftStoreError::Write {
            path: self.path.clone(),
            source: std::io::Error::other(source),
        })?;

        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir).map_err(write_err)?,
            None => NamedTempFile::new().map_err(write_err)?,
        };
        temp_file.write_all(contents.as_bytes()).map_err(write_err)?;
        temp_file.as_file_mut().sync_all().map_err(write_err)?;
        temp_file
            .persist(&self.path)
            .map_err(|err| write_err(err.error))?;

        debug!(path = %self.path.display(), "draft slot written");
        Ok(())
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}
