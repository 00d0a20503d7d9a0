//! Build options describing which policies a selection should apply.

use poolselect_core::AffinityLabel;
use serde::{Deserialize, Serialize};

use crate::policy::{AntiAffinityLabel, Policy, PolicyContext, PolicyName, PreferAntiAffinityLabel};

/// One policy to attach to a selection.
///
/// Options are plain values; they are turned into [`Policy`] instances against
/// a [`PolicyContext`] when the selection is built, in the order given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", content = "label", rename_all = "kebab-case")]
pub enum BuildOption {
    /// Hard anti-affinity for the label.
    AntiAffinityLabel(AffinityLabel),
    /// Preferred anti-affinity for the label.
    PreferAntiAffinityLabel(AffinityLabel),
}

impl BuildOption {
    /// Returns the name of the policy this option builds.
    #[must_use]
    pub const fn name(&self) -> PolicyName {
        match self {
            Self::AntiAffinityLabel(_) => PolicyName::AntiAffinityLabel,
            Self::PreferAntiAffinityLabel(_) => PolicyName::PreferAntiAffinityLabel,
        }
    }

    /// Returns the affinity label of this option.
    #[must_use]
    pub fn label(&self) -> &AffinityLabel {
        match self {
            Self::AntiAffinityLabel(l) | Self::PreferAntiAffinityLabel(l) => l,
        }
    }

    /// Builds the configured policy.
    #[must_use]
    pub fn build(&self, ctx: &PolicyContext) -> Policy {
        match self {
            Self::AntiAffinityLabel(label) => AntiAffinityLabel::new(label.clone(), ctx).into(),
            Self::PreferAntiAffinityLabel(label) => {
                PreferAntiAffinityLabel::new(label.clone(), ctx).into()
            }
        }
    }
}

/// Hard anti-affinity against replicas labelled with `label`.
#[must_use]
pub fn anti_affinity_label(label: &str) -> BuildOption {
    BuildOption::AntiAffinityLabel(AffinityLabel::from(label))
}

/// Preferred anti-affinity against replicas labelled with `label`.
#[must_use]
pub fn prefer_anti_affinity_label(label: &str) -> BuildOption {
    BuildOption::PreferAntiAffinityLabel(AffinityLabel::from(label))
}
