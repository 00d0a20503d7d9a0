//! Anti-affinity placement policies.
//!
//! A policy narrows a list of candidate pools by looking at where replicas of
//! the same affinity scope already live. Two variants exist:
//!
//! - [`AntiAffinityLabel`] (hard): pools already hosting a replica of the scope
//!   are excluded, even if that leaves nothing.
//! - [`PreferAntiAffinityLabel`] (soft): same exclusion, but if nothing would
//!   remain the original candidates are returned untouched.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use poolselect_core::{AffinityLabel, Config, Error, LabelKeys, ListOptions, PoolUid, Result};
use tracing::{debug, info, warn};

use crate::lister::ReplicaLister;

/// Name identifying a policy kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyName {
    /// Hard anti-affinity.
    AntiAffinityLabel,
    /// Preferred (soft) anti-affinity.
    PreferAntiAffinityLabel,
}

impl PolicyName {
    /// Returns the stable string form of this name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AntiAffinityLabel => "anti-affinity-label",
            Self::PreferAntiAffinityLabel => "prefer-anti-affinity-label",
        }
    }
}

impl fmt::Display for PolicyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dependencies shared by every policy of a selection.
#[derive(Clone)]
pub struct PolicyContext {
    lister: Arc<dyn ReplicaLister>,
    keys: LabelKeys,
}

impl PolicyContext {
    /// Creates a context using the default label keys.
    #[must_use]
    pub fn new(lister: Arc<dyn ReplicaLister>) -> Self {
        Self { lister, keys: LabelKeys::default() }
    }

    /// Creates a context using the label keys from `config`.
    #[must_use]
    pub fn from_config(config: &Config, lister: Arc<dyn ReplicaLister>) -> Self {
        Self { lister, keys: config.labels.clone() }
    }

    /// Overrides the label keys.
    #[must_use]
    pub fn with_label_keys(mut self, keys: LabelKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Returns the label keys.
    #[must_use]
    pub fn keys(&self) -> &LabelKeys {
        &self.keys
    }

    /// Returns the replica lister.
    #[must_use]
    pub fn lister(&self) -> &Arc<dyn ReplicaLister> {
        &self.lister
    }
}

impl fmt::Debug for PolicyContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyContext").field("keys", &self.keys).finish_non_exhaustive()
    }
}

/// Hard anti-affinity: excludes every pool already hosting a replica of the scope.
#[derive(Clone)]
pub struct AntiAffinityLabel {
    label_selector: AffinityLabel,
    keys: LabelKeys,
    lister: Arc<dyn ReplicaLister>,
}

impl AntiAffinityLabel {
    /// Creates a hard anti-affinity policy for `label`.
    #[must_use]
    pub fn new(label: impl Into<AffinityLabel>, ctx: &PolicyContext) -> Self {
        Self { label_selector: label.into(), keys: ctx.keys.clone(), lister: Arc::clone(&ctx.lister) }
    }

    /// Returns the policy name.
    #[must_use]
    pub const fn name(&self) -> PolicyName {
        PolicyName::AntiAffinityLabel
    }

    /// Returns the affinity label this policy queries by.
    #[must_use]
    pub fn label(&self) -> &AffinityLabel {
        &self.label_selector
    }

    /// Returns the candidates not already hosting a replica of this scope.
    ///
    /// Order is preserved. An empty result is valid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] without querying if the label or the
    /// anti-affinity key contains `,` or `=`, and [`Error::QueryFailed`] if
    /// the replica lister fails.
    pub fn filter(&self, candidates: &[PoolUid]) -> Result<Vec<PoolUid>> {
        let opts = ListOptions::new(self.keys.selector_for(&self.label_selector));
        opts.label_selector.validate()?;
        let records = self.lister.list(&opts).map_err(|message| {
            warn!(
                selector = %opts.label_selector,
                error = %message,
                "Failed to list replicas for anti-affinity"
            );
            Error::query_failed(opts.label_selector.to_string(), message)
        })?;

        let occupied: HashSet<PoolUid> =
            records.iter().filter_map(|r| r.pool_uid(&self.keys)).collect();

        let filtered: Vec<PoolUid> =
            candidates.iter().filter(|uid| !occupied.contains(*uid)).cloned().collect();

        debug!(
            policy = %self.name(),
            label = %self.label_selector,
            candidates = candidates.len(),
            occupied = occupied.len(),
            remaining = filtered.len(),
            "Applied anti-affinity filter"
        );

        Ok(filtered)
    }
}

impl fmt::Debug for AntiAffinityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AntiAffinityLabel")
            .field("label_selector", &self.label_selector)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

/// Preferred anti-affinity: like [`AntiAffinityLabel`] but never blocks placement.
#[derive(Debug, Clone)]
pub struct PreferAntiAffinityLabel {
    anti_affinity: AntiAffinityLabel,
}

impl PreferAntiAffinityLabel {
    /// Creates a preferred anti-affinity policy for `label`.
    #[must_use]
    pub fn new(label: impl Into<AffinityLabel>, ctx: &PolicyContext) -> Self {
        Self { anti_affinity: AntiAffinityLabel::new(label, ctx) }
    }

    /// Returns the policy name.
    #[must_use]
    pub const fn name(&self) -> PolicyName {
        PolicyName::PreferAntiAffinityLabel
    }

    /// Returns the affinity label this policy queries by.
    #[must_use]
    pub fn label(&self) -> &AffinityLabel {
        self.anti_affinity.label()
    }

    /// Returns the candidates not hosting a replica of this scope, or all
    /// candidates unchanged if every one of them does.
    ///
    /// # Errors
    ///
    /// See [`AntiAffinityLabel::filter`]; errors are propagated unchanged.
    pub fn filter(&self, candidates: &[PoolUid]) -> Result<Vec<PoolUid>> {
        let filtered = self.anti_affinity.filter(candidates)?;
        if !filtered.is_empty() {
            return Ok(filtered);
        }

        info!(
            label = %self.label(),
            candidates = candidates.len(),
            "No pool satisfies preferred anti-affinity, keeping all candidates"
        );
        Ok(candidates.to_vec())
    }
}

impl From<AntiAffinityLabel> for PreferAntiAffinityLabel {
    fn from(anti_affinity: AntiAffinityLabel) -> Self {
        Self { anti_affinity }
    }
}

/// A configured placement policy.
#[derive(Debug, Clone)]
pub enum Policy {
    /// Hard anti-affinity.
    AntiAffinity(AntiAffinityLabel),
    /// Preferred anti-affinity.
    PreferAntiAffinity(PreferAntiAffinityLabel),
}

impl Policy {
    /// Returns the policy name.
    #[must_use]
    pub const fn name(&self) -> PolicyName {
        match self {
            Self::AntiAffinity(p) => p.name(),
            Self::PreferAntiAffinity(p) => p.name(),
        }
    }

    /// Returns the affinity label this policy queries by.
    #[must_use]
    pub fn label(&self) -> &AffinityLabel {
        match self {
            Self::AntiAffinity(p) => p.label(),
            Self::PreferAntiAffinity(p) => p.label(),
        }
    }

    /// Filters `candidates` according to this policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] for an unusable label and
    /// [`Error::QueryFailed`] if the replica lister fails.
    pub fn filter(&self, candidates: &[PoolUid]) -> Result<Vec<PoolUid>> {
        match self {
            Self::AntiAffinity(p) => p.filter(candidates),
            Self::PreferAntiAffinity(p) => p.filter(candidates),
        }
    }
}

impl From<AntiAffinityLabel> for Policy {
    fn from(p: AntiAffinityLabel) -> Self {
        Self::AntiAffinity(p)
    }
}

impl From<PreferAntiAffinityLabel> for Policy {
    fn from(p: PreferAntiAffinityLabel) -> Self {
        Self::PreferAntiAffinity(p)
    }
}
