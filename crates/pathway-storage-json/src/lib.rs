use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use chrono::{DateTime, Utc};
use pathway_core::{ProgressStore, StorageError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const PROGRESS_FILE: &str = "progress.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub step: usize,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProgressFile {
    #[serde(default)]
    entries: BTreeMap<String, ProgressEntry>,
}

/// Wizard progress kept in a single `progress.json` under the state directory.
#[derive(Debug)]
pub struct JsonProgressStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    guard: Mutex<()>,
}

impl JsonProgressStore {
    pub fn new(state_dir: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&state_dir)?;
        Ok(Self {
            path: state_dir.join(PROGRESS_FILE),
            guard: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry(&self, key: &str) -> Result<Option<ProgressEntry>, StorageError> {
        Ok(self.read()?.entries.remove(key))
    }

    /// Forgets the progress saved under `key`.
    pub fn clear(&self, key: &str) -> Result<(), StorageError> {
        let _lock = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = self.read_for_update()?;
        if file.entries.remove(key).is_some() {
            self.write(&file)?;
        }
        Ok(())
    }

    fn read(&self) -> Result<ProgressFile, StorageError> {
        if !self.path.exists() {
            return Ok(ProgressFile::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| StorageError::Serde(err.to_string()))
    }

    /// Like `read`, but an unparseable file is replaced instead of blocking
    /// every later save.
    fn read_for_update(&self) -> Result<ProgressFile, StorageError> {
        match self.read() {
            Err(StorageError::Serde(reason)) => {
                warn!(path = %self.path.display(), %reason, "discarding unreadable progress file");
                Ok(ProgressFile::default())
            }
            other => other,
        }
    }

    fn write(&self, file: &ProgressFile) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(file)
            .map_err(|err| StorageError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ProgressStore for JsonProgressStore {
    fn load_step(&self, key: &str) -> Result<Option<usize>, StorageError> {
        Ok(self.entry(key)?.map(|entry| entry.step))
    }

    fn save_step(&self, key: &str, index: usize) -> Result<(), StorageError> {
        let _lock = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = self.read_for_update()?;
        file.entries.insert(
            key.to_string(),
            ProgressEntry {
                step: index,
                updated_at: Utc::now(),
            },
        );
        self.write(&file)?;
        debug!(key, index, path = %self.path.display(), "progress saved");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StorageError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
