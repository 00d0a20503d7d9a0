//! Pool selection: an ordered set of policies applied to candidate pools.

use poolselect_core::{Error, PoolUid, Result};
use tracing::{debug, warn};

use crate::option::BuildOption;
use crate::policy::{Policy, PolicyContext, PolicyName};

/// Policies and candidate pools for a single placement decision.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Candidate pools, in caller order.
    pool_uids: Vec<PoolUid>,
    /// Policies, in registration order.
    policies: Vec<Policy>,
}

impl Selection {
    /// Creates a selection, building one policy per option in order.
    #[must_use]
    pub fn new<I>(pool_uids: Vec<PoolUid>, ctx: &PolicyContext, options: I) -> Self
    where
        I: IntoIterator<Item = BuildOption>,
    {
        let policies = options.into_iter().map(|o| o.build(ctx)).collect();
        Self { pool_uids, policies }
    }

    /// Appends an already constructed policy.
    #[must_use]
    pub fn with_policy(mut self, policy: impl Into<Policy>) -> Self {
        self.policies.push(policy.into());
        self
    }

    /// Returns the candidate pools.
    #[must_use]
    pub fn pool_uids(&self) -> &[PoolUid] {
        &self.pool_uids
    }

    /// Returns the configured policies.
    #[must_use]
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    /// Returns the names of the configured policies, in order.
    #[must_use]
    pub fn policy_names(&self) -> Vec<PolicyName> {
        self.policies.iter().map(Policy::name).collect()
    }

    /// Returns true if any configured policy has the given name.
    #[must_use]
    pub fn is_policy(&self, name: PolicyName) -> bool {
        self.policies.iter().any(|p| p.name() == name)
    }

    /// Checks that the configured policies do not contradict each other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConflictingPolicies`] if both hard and preferred
    /// anti-affinity are configured.
    pub fn validate(&self) -> Result<()> {
        let hard = PolicyName::AntiAffinityLabel;
        let soft = PolicyName::PreferAntiAffinityLabel;

        if self.is_policy(hard) && self.is_policy(soft) {
            warn!(policies = ?self.policy_names(), "Rejecting conflicting anti-affinity policies");
            return Err(Error::ConflictingPolicies {
                hard: hard.as_str().to_string(),
                soft: soft.as_str().to_string(),
            });
        }
        Ok(())
    }

    /// Applies every policy to `candidates` in registration order.
    ///
    /// Each policy sees the output of the previous one. The selection is
    /// validated first, so conflicting policies never reach the lister.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConflictingPolicies`] before any query if the
    /// policies conflict, otherwise the first policy error; no partial result
    /// is produced.
    pub fn apply(&self, candidates: &[PoolUid]) -> Result<Vec<PoolUid>> {
        self.validate()?;

        let mut filtered = candidates.to_vec();
        for policy in &self.policies {
            filtered = policy.filter(&filtered)?;
        }

        debug!(
            policies = self.policies.len(),
            candidates = candidates.len(),
            selected = filtered.len(),
            "Applied selection"
        );
        Ok(filtered)
    }

    /// Applies every policy to this selection's own candidate pools.
    ///
    /// # Errors
    ///
    /// See [`Selection::apply`].
    pub fn filter(&self) -> Result<Vec<PoolUid>> {
        self.apply(&self.pool_uids)
    }
}

/// Validates and applies `options` to `pool_uids`.
///
/// With no options the candidates are returned unchanged and no query is made.
///
/// # Errors
///
/// Returns [`Error::ConflictingPolicies`] before any query if the options
/// conflict, or the first policy error otherwise.
pub fn filter<I>(pool_uids: Vec<PoolUid>, ctx: &PolicyContext, options: I) -> Result<Vec<PoolUid>>
where
    I: IntoIterator<Item = BuildOption>,
{
    let options: Vec<BuildOption> = options.into_iter().collect();
    if options.is_empty() {
        return Ok(pool_uids);
    }

    Selection::new(pool_uids, ctx, options).filter()
}
