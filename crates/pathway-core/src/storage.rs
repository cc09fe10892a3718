use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::StorageError;

/// Durable home for wizard progress: one step index per progress key.
pub trait ProgressStore: Send + Sync {
    fn load_step(&self, key: &str) -> Result<Option<usize>, StorageError>;
    fn save_step(&self, key: &str, index: usize) -> Result<(), StorageError>;
}

/// In-process store, used by tests and one-shot sessions.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    entries: Mutex<HashMap<String, usize>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a key, as if an earlier session had saved it.
    pub fn with_step(self, key: &str, index: usize) -> Self {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), index);
        self
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load_step(&self, key: &str) -> Result<Option<usize>, StorageError> {
        Ok(self.get(key))
    }

    fn save_step(&self, key: &str, index: usize) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), index);
        Ok(())
    }
}
