//! Common data types for pool selection.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::selector::LabelSelector;

/// Default label key marking the anti-affinity scope of a replica.
pub const DEFAULT_ANTI_AFFINITY_KEY: &str = "openebs.io/replica-anti-affinity";

/// Default label key carrying the UID of the pool a replica lives on.
pub const DEFAULT_POOL_UID_KEY: &str = "cstorpool.openebs.io/uid";

/// Unique identifier of a storage pool.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolUid(String);

impl PoolUid {
    /// Creates a pool UID.
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    /// Returns the UID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoolUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PoolUid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PoolUid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for PoolUid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Value identifying an anti-affinity scope, e.g. all replicas of one volume.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AffinityLabel(String);

impl AffinityLabel {
    /// Creates an affinity label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AffinityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AffinityLabel {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AffinityLabel {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The label keys placement records are read with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelKeys {
    /// Key whose value is the affinity scope of a replica.
    pub anti_affinity: String,
    /// Key whose value is the UID of the pool hosting a replica.
    pub pool_uid: String,
}

impl Default for LabelKeys {
    fn default() -> Self {
        Self {
            anti_affinity: DEFAULT_ANTI_AFFINITY_KEY.to_string(),
            pool_uid: DEFAULT_POOL_UID_KEY.to_string(),
        }
    }
}

impl LabelKeys {
    /// Builds the selector matching every replica in the given affinity scope.
    #[must_use]
    pub fn selector_for(&self, label: &AffinityLabel) -> LabelSelector {
        LabelSelector::equality(&self.anti_affinity, label.as_str())
    }
}

/// Read-only view of an existing replica's placement metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Name of the replica.
    pub name: String,
    /// Labels attached to the replica.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl PlacementRecord {
    /// Creates a record with no labels.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), labels: BTreeMap::new() }
    }

    /// Adds a label.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Creates a record for a replica in `scope` hosted on `pool`.
    #[must_use]
    pub fn placed(
        name: impl Into<String>,
        keys: &LabelKeys,
        scope: &AffinityLabel,
        pool: &PoolUid,
    ) -> Self {
        Self::new(name)
            .with_label(&keys.anti_affinity, scope.as_str())
            .with_label(&keys.pool_uid, pool.as_str())
    }

    /// Returns the value of a label, if set.
    #[must_use]
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Returns the pool this replica is placed on.
    #[must_use]
    pub fn pool_uid(&self, keys: &LabelKeys) -> Option<PoolUid> {
        self.label(&keys.pool_uid).map(PoolUid::from)
    }

    /// Returns the affinity scope of this replica.
    #[must_use]
    pub fn affinity(&self, keys: &LabelKeys) -> Option<AffinityLabel> {
        self.label(&keys.anti_affinity).map(AffinityLabel::from)
    }
}

/// Options passed to a replica listing query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Only replicas whose labels satisfy this selector are returned.
    pub label_selector: LabelSelector,
}

impl ListOptions {
    /// Creates list options with the given selector.
    #[must_use]
    pub fn new(label_selector: LabelSelector) -> Self {
        Self { label_selector }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placed_record_labels() {
        let keys = LabelKeys::default();
        let record = PlacementRecord::placed(
            "vol-1-rep-1",
            &keys,
            &AffinityLabel::from("vol-1"),
            &PoolUid::from("pool-a"),
        );

        assert_eq!(record.label(DEFAULT_ANTI_AFFINITY_KEY), Some("vol-1"));
        assert_eq!(record.pool_uid(&keys), Some(PoolUid::from("pool-a")));
        assert_eq!(record.affinity(&keys), Some(AffinityLabel::from("vol-1")));
    }

    #[test]
    fn test_record_without_pool_label() {
        let keys = LabelKeys::default();
        let record = PlacementRecord::new("orphan").with_label(&keys.anti_affinity, "vol-1");

        assert!(record.pool_uid(&keys).is_none());
    }

    #[test]
    fn test_selector_for_scope() {
        let keys = LabelKeys::default();
        let selector = keys.selector_for(&AffinityLabel::from("vol-9"));

        assert_eq!(selector.to_string(), "openebs.io/replica-anti-affinity=vol-9");
    }

    #[test]
    fn test_record_from_toml() {
        let record: PlacementRecord = toml::from_str(
            r#"
            name = "vol-1-rep-2"

            [labels]
            "openebs.io/replica-anti-affinity" = "vol-1"
            "cstorpool.openebs.io/uid" = "pool-x"
            "#,
        )
        .unwrap();

        let keys = LabelKeys::default();
        assert_eq!(record.pool_uid(&keys).unwrap().as_str(), "pool-x");
        assert_eq!(record.affinity(&keys).unwrap().as_str(), "vol-1");
    }
}
