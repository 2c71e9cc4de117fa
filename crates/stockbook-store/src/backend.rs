//! # Snapshot Backend
//!
//! The key-value-shaped storage contract: four named collections, each read
//! and written as one whole-collection JSON snapshot.
//!
//! ## Why Whole-Collection Snapshots?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Snapshot Storage Model                              │
//! │                                                                         │
//! │   Collection key        Snapshot document                              │
//! │   ──────────────        ─────────────────                              │
//! │   products         ──►  [ {..}, {..}, ... ]   (full array, atomic)     │
//! │   customers        ──►  [ {..}, {..} ]                                 │
//! │   transactions     ──►  [ {..}, ... ]         (newest first)           │
//! │   units            ──►  [ "piece", "box" ]                             │
//! │                                                                         │
//! │   The dataset is a few hundred records for a small shop; rewriting a   │
//! │   whole collection per mutation is simpler than a schema and fast      │
//! │   enough by orders of magnitude.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two backends ship with the crate: [`JsonFileBackend`] (one file per
//! collection under a data directory) and [`MemoryBackend`] (ephemeral,
//! for tests).

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreResult;

// =============================================================================
// Collection Keys
// =============================================================================

/// The four named collections the store persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Customers,
    Transactions,
    Units,
}

impl Collection {
    /// All collections, in load order.
    pub const ALL: [Collection; 4] = [
        Collection::Products,
        Collection::Customers,
        Collection::Transactions,
        Collection::Units,
    ];

    /// Stable storage key for this collection.
    pub const fn key(self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Customers => "customers",
            Collection::Transactions => "transactions",
            Collection::Units => "units",
        }
    }
}

// =============================================================================
// Backend Trait
// =============================================================================

/// A key-value-shaped snapshot store.
///
/// Implementations only move opaque JSON strings; parsing and shaping is the
/// [`Store`](crate::Store)'s job. `read` returning `Ok(None)` means the
/// collection has never been written (first run).
pub trait Backend: Send {
    /// Reads the snapshot for a collection, or `None` if absent.
    fn read(&self, collection: Collection) -> StoreResult<Option<String>>;

    /// Replaces the snapshot for a collection.
    fn write(&mut self, collection: Collection, json: &str) -> StoreResult<()>;
}

// =============================================================================
// JSON File Backend
// =============================================================================

/// File-per-collection backend: `<dir>/products.json`, `<dir>/units.json`...
///
/// The data directory is created lazily on first write, so pointing the
/// store at a fresh path just works.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Creates a backend rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileBackend { dir: dir.into() }
    }

    /// The file path backing a collection.
    fn path(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.key()))
    }

    /// The data directory this backend writes under.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Backend for JsonFileBackend {
    fn read(&self, collection: Collection) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path(collection)) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, collection: Collection, json: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(collection);
        debug!(collection = collection.key(), path = %path.display(), "Writing snapshot");
        fs::write(path, json)?;
        Ok(())
    }
}

// =============================================================================
// Memory Backend
// =============================================================================

/// Ephemeral backend for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<Collection, String>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend.
    pub fn new() -> Self {
        MemoryBackend::default()
    }
}

impl Backend for MemoryBackend {
    fn read(&self, collection: Collection) -> StoreResult<Option<String>> {
        Ok(self.entries.get(&collection).cloned())
    }

    fn write(&mut self, collection: Collection, json: &str) -> StoreResult<()> {
        self.entries.insert(collection, json.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
