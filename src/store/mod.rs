//! Slot-based JSON persistence.
//!
//! Every collection lives in one named slot holding a complete JSON array;
//! a save overwrites the slot wholesale. There are no deltas and no
//! rollback: the gateway either replaces the document or surfaces the error.
//! A slot that is missing or unparsable loads as an empty collection so a
//! damaged store degrades to a fresh one instead of failing every read.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// The four persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Brokers,
    Products,
    ProductTypes,
    Portfolios,
}

impl Slot {
    pub const ALL: [Slot; 4] = [
        Slot::Brokers,
        Slot::Products,
        Slot::ProductTypes,
        Slot::Portfolios,
    ];

    /// Stable slot key, also used as the file stem by [`FileStore`].
    pub fn key(self) -> &'static str {
        match self {
            Slot::Brokers => "brokers",
            Slot::Products => "products",
            Slot::ProductTypes => "productTypes",
            Slot::Portfolios => "portfolios",
        }
    }
}

/// Raw slot transport. Implementations only move strings; all JSON
/// awareness lives in [`Store`].
pub trait StorageGateway {
    /// `None` when the slot has never been written.
    fn read(&self, slot: Slot) -> Result<Option<String>>;
    fn write(&self, slot: Slot, payload: &str) -> Result<()>;
    fn remove(&self, slot: Slot) -> Result<()>;
}

/// Typed facade over a gateway.
pub struct Store {
    gateway: Box<dyn StorageGateway>,
}

impl Store {
    pub fn new(gateway: impl StorageGateway + 'static) -> Self {
        Self {
            gateway: Box::new(gateway),
        }
    }

    /// Store backed by process memory only. Used by tests and ephemeral
    /// sessions.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Load a whole collection. Absent and unparsable slots both yield an
    /// empty collection; the latter is logged.
    pub fn load<T: DeserializeOwned>(&self, slot: Slot) -> Vec<T> {
        let payload = match self.gateway.read(slot) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("Failed to read slot {}: {}", slot.key(), err);
                return Vec::new();
            }
        };

        match serde_json::from_str(&payload) {
            Ok(records) => records,
            Err(err) => {
                log::warn!("Ignoring unparsable slot {}: {}", slot.key(), err);
                Vec::new()
            }
        }
    }

    /// Replace a whole collection.
    pub fn save<T: Serialize>(&self, slot: Slot, records: &[T]) -> Result<()> {
        let payload = serde_json::to_string(records).map_err(io::Error::from)?;
        self.gateway.write(slot, &payload)
    }

    /// Remove all four slots.
    pub fn clear(&self) -> Result<()> {
        for slot in Slot::ALL {
            self.gateway.remove(slot)?;
        }
        Ok(())
    }
}

/// One `<slot>.json` document per slot inside a data directory. Writes go
/// through a sibling temp file and a rename, so a crashed save leaves the
/// previous document intact.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Platform data directory for the application, e.g.
    /// `~/.local/share/portfolio-keeper` on Linux.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("portfolio-keeper"))
    }

    fn slot_path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}.json", slot.key()))
    }
}

impl StorageGateway for FileStore {
    fn read(&self, slot: Slot) -> Result<Option<String>> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, slot: Slot, payload: &str) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(payload.as_bytes())?;
        tmp.persist(self.slot_path(slot))
            .map_err(|err| Error::Storage(err.error))?;
        Ok(())
    }

    fn remove(&self, slot: Slot) -> Result<()> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory gateway. The crate is single-threaded by design, so interior
/// mutability via `RefCell` is sufficient.
#[derive(Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<Slot, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageGateway for MemoryStore {
    fn read(&self, slot: Slot) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(&slot).cloned())
    }

    fn write(&self, slot: Slot, payload: &str) -> Result<()> {
        self.slots.borrow_mut().insert(slot, payload.to_string());
        Ok(())
    }

    fn remove(&self, slot: Slot) -> Result<()> {
        self.slots.borrow_mut().remove(&slot);
        Ok(())
    }
}
