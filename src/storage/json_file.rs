//! JSON File Storage
//!
//! Reads and writes the whole record collection as one JSON document.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::config::{Config, WriteMode};
use crate::error::Result;
use crate::record::RecordCollection;

/// What `load()` found at the backing path
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// No backing file yet
    Missing,

    /// The document parsed cleanly
    Loaded(RecordCollection),

    /// The file exists but is not a valid document. Its bytes were copied
    /// to `backup` before anything else could overwrite them; `None` if the
    /// copy itself failed.
    Corrupt {
        reason: String,
        backup: Option<PathBuf>,
    },
}

impl LoadOutcome {
    /// The collection a session should start from
    ///
    /// Both `Missing` and `Corrupt` start empty.
    pub fn into_collection(self) -> RecordCollection {
        match self {
            LoadOutcome::Loaded(collection) => collection,
            LoadOutcome::Missing | LoadOutcome::Corrupt { .. } => RecordCollection::new(),
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, LoadOutcome::Corrupt { .. })
    }
}

/// Storage adapter for the backing JSON file
///
/// Every save rewrites the full document. There is no incremental format.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    /// Backing file
    path: PathBuf,

    /// How saves replace the file
    write_mode: WriteMode,
}

impl JsonFileStorage {
    const INDENT: &'static [u8] = b"    ";
    const BACKUP_SUFFIX: &'static str = "corrupt";

    pub fn new(path: impl Into<PathBuf>, write_mode: WriteMode) -> Self {
        Self {
            path: path.into(),
            write_mode,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.data_file, config.write_mode)
    }

    /// Read the backing file
    ///
    /// Returns:
    /// - `Ok(Missing)` — no file at the path
    /// - `Ok(Loaded(..))` — parsed document
    /// - `Ok(Corrupt { .. })` — unparseable document, backed up if possible
    /// - `Err(Io)` — the file exists but could not be read
    pub fn load(&self) -> Result<LoadOutcome> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("No data file at {}, starting empty", self.path.display());
                return Ok(LoadOutcome::Missing);
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<RecordCollection>(&bytes) {
            Ok(collection) => {
                tracing::info!(
                    "Loaded {} records from {}",
                    collection.len(),
                    self.path.display()
                );
                Ok(LoadOutcome::Loaded(collection))
            }
            Err(e) => {
                let backup = self.write_backup(&bytes);
                match &backup {
                    Some(copy) => tracing::warn!(
                        "Data file {} is malformed ({}); copied to {}",
                        self.path.display(),
                        e,
                        copy.display()
                    ),
                    None => tracing::warn!(
                        "Data file {} is malformed ({}); no backup could be written",
                        self.path.display(),
                        e
                    ),
                }
                Ok(LoadOutcome::Corrupt {
                    reason: e.to_string(),
                    backup,
                })
            }
        }
    }

    /// Serialize the full collection and replace the backing file
    pub fn save(&self, collection: &RecordCollection) -> Result<()> {
        let bytes = Self::encode(collection)?;

        let dir = self.parent_dir();
        fs::create_dir_all(&dir)?;

        match self.write_mode {
            WriteMode::Atomic => self.write_atomic(&dir, &bytes)?,
            WriteMode::InPlace => {
                let mut file = File::create(&self.path)?;
                file.write_all(&bytes)?;
                file.sync_all()?;
            }
        }

        tracing::debug!("Saved {} records to {}", collection.len(), self.path.display());
        Ok(())
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Pretty JSON with four-space indentation and a trailing newline
    fn encode(collection: &RecordCollection) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let formatter = PrettyFormatter::with_indent(Self::INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
        collection.serialize(&mut serializer)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn write_atomic(&self, dir: &Path, bytes: &[u8]) -> Result<()> {
        let tmp = dir.join(format!(
            ".{}.tmp.{}",
            self.file_name(),
            std::process::id()
        ));

        let written = (|| -> std::io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        })();

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        // Directory fsync makes the rename durable; not supported everywhere.
        if let Ok(handle) = File::open(dir) {
            let _ = handle.sync_all();
        }
        Ok(())
    }

    /// Directory holding the backing file ("students.json" → ".")
    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "records".to_string())
    }

    /// Copy unparseable bytes aside; a failed copy does not fail the load
    fn write_backup(&self, bytes: &[u8]) -> Option<PathBuf> {
        let backup = self.next_backup_path();
        match fs::write(&backup, bytes) {
            Ok(()) => Some(backup),
            Err(e) => {
                tracing::warn!("Could not write backup {}: {}", backup.display(), e);
                None
            }
        }
    }

    /// First free backup path: "students.json.corrupt", then ".corrupt.1", ...
    fn next_backup_path(&self) -> PathBuf {
        let base = self
            .parent_dir()
            .join(format!("{}.{}", self.file_name(), Self::BACKUP_SUFFIX));
        if !base.exists() {
            return base;
        }

        let mut n = 1u32;
        loop {
            let candidate = self
                .parent_dir()
                .join(format!("{}.{}.{}", self.file_name(), Self::BACKUP_SUFFIX, n));
            if !candidate.exists() {
                return candidate;
            }
            n += 1;
        }
    }
}
