//! Replica listing capability.
//!
//! Policies never talk to a cluster directly. They are handed a
//! [`ReplicaLister`] which answers "which replicas carry these labels".
//! Production callers wrap their cluster client; tests use a closure or
//! [`InMemoryReplicaLister`].

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use poolselect_core::{ListOptions, PlacementRecord};

/// Source of existing placement records.
pub trait ReplicaLister: Send + Sync {
    /// Lists all replicas matching the options' label selector.
    fn list(&self, opts: &ListOptions) -> Result<Vec<PlacementRecord>, String>;
}

impl<F> ReplicaLister for F
where
    F: Fn(&ListOptions) -> Result<Vec<PlacementRecord>, String> + Send + Sync,
{
    fn list(&self, opts: &ListOptions) -> Result<Vec<PlacementRecord>, String> {
        self(opts)
    }
}

/// A thread-safe in-memory replica store.
///
/// Every call to [`ReplicaLister::list`] counts as one query.
#[derive(Debug, Default)]
pub struct InMemoryReplicaLister {
    records: RwLock<Vec<PlacementRecord>>,
    queries: AtomicUsize,
}

impl InMemoryReplicaLister {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records.
    #[must_use]
    pub fn with_records(records: Vec<PlacementRecord>) -> Self {
        Self { records: RwLock::new(records), queries: AtomicUsize::new(0) }
    }

    /// Adds a record.
    pub fn insert(&self, record: PlacementRecord) {
        self.records.write().push(record);
    }

    /// Removes every record with the given name. Returns how many were removed.
    pub fn remove(&self, name: &str) -> usize {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.name != name);
        before - records.len()
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Returns how many list queries have been served.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl ReplicaLister for InMemoryReplicaLister {
    fn list(&self, opts: &ListOptions) -> Result<Vec<PlacementRecord>, String> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let records = self.records.read();
        Ok(records.iter().filter(|r| opts.label_selector.matches(&r.labels)).cloned().collect())
    }
}

/// A lister that always fails with the same message.
#[derive(Debug, Clone)]
pub struct FailingReplicaLister {
    message: String,
}

impl FailingReplicaLister {
    /// Creates a lister failing with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl ReplicaLister for FailingReplicaLister {
    fn list(&self, _opts: &ListOptions) -> Result<Vec<PlacementRecord>, String> {
        Err(self.message.clone())
    }
}
