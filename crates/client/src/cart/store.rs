//! Durable cart persistence.
//!
//! The cart survives restarts via a single record under a fixed
//! `cart-storage` namespace. A missing or empty record reads as the empty
//! cart; no versioning or migration logic exists.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use souq_core::CartLine;

/// Fixed namespace key for the durable cart record.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Errors from the persistence substrate.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("cart storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be decoded.
    #[error("cart storage decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Key-value persistence abstraction for the cart record.
///
/// Implementations only need durable load/save of the serialized line
/// list; the engine owns all aggregation logic.
pub trait CartStore: Send + Sync {
    /// Load the persisted lines. Absent or empty records are an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if an existing record cannot be read or decoded.
    fn load(&self) -> Result<Vec<CartLine>, StoreError>;

    /// Persist the given lines, replacing the previous record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be written.
    fn save(&self, lines: &[CartLine]) -> Result<(), StoreError>;
}

/// On-disk record shape.
#[derive(Serialize, Deserialize)]
struct CartRecord {
    items: Vec<CartLine>,
}

// =============================================================================
// JsonFileStore
// =============================================================================

/// File-backed store: one JSON record at `<dir>/cart-storage.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given directory.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{CART_STORAGE_KEY}.json")),
        }
    }

    /// Path of the durable record.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStore for JsonFileStore {
    fn load(&self) -> Result<Vec<CartLine>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let record: CartRecord = serde_json::from_str(&contents)?;
        Ok(record.items)
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let record = CartRecord {
            items: lines.to_vec(),
        };
        let contents = serde_json::to_string(&record)?;

        // Write-then-rename so a crash mid-write never truncates the record.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    lines: Mutex<Vec<CartLine>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryStore {
    fn load(&self) -> Result<Vec<CartLine>, StoreError> {
        Ok(self
            .lines
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().clone(), |l| l.clone()))
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StoreError> {
        match self.lines.lock() {
            Ok(mut guard) => *guard = lines.to_vec(),
            Err(poisoned) => *poisoned.into_inner() = lines.to_vec(),
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use souq_core::ProductId;

    fn temp_dir(label: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("souq-{label}-{}-{nanos}", std::process::id()))
    }

    #[test]
    fn test_load_absent_record_is_empty_cart() {
        let store = JsonFileStore::new(temp_dir("absent"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_empty_record_is_empty_cart() {
        let dir = temp_dir("empty");
        let store = JsonFileStore::new(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(store.path(), "").unwrap();

        assert!(store.load().unwrap().is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = temp_dir("roundtrip");
        let store = JsonFileStore::new(&dir);

        let lines = vec![
            CartLine::new(ProductId::new(1), 2),
            CartLine::new(ProductId::new(9), 5),
        ];
        store.save(&lines).unwrap();
        assert_eq!(store.load().unwrap(), lines);

        // Overwrite replaces, not appends
        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_record_uses_original_field_names() {
        let dir = temp_dir("fields");
        let store = JsonFileStore::new(&dir);
        store.save(&[CartLine::new(ProductId::new(4), 1)]).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"items\""));
        assert!(raw.contains("\"productId\":4"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());

        let lines = vec![CartLine::new(ProductId::new(7), 3)];
        store.save(&lines).unwrap();
        assert_eq!(store.load().unwrap(), lines);
    }
}
