//! Anti-affinity aware storage pool selection.
//!
//! This crate decides which storage pools may host a new replica of a volume.
//! Candidate pools are narrowed by placement policies that look at where
//! replicas of the same affinity scope already live, so that siblings do not
//! end up sharing a pool.
//!
//! # Overview
//!
//! - [`AntiAffinityLabel`] (hard) excludes every pool already hosting a
//!   replica carrying the label. The result may be empty.
//! - [`PreferAntiAffinityLabel`] (soft) does the same exclusion but falls back
//!   to the unfiltered candidates when nothing would remain.
//! - A [`Selection`] applies policies in registration order and rejects hard
//!   and soft anti-affinity being requested together.
//! - The [`registry`] maps stable function names to builders for rule authors.
//!
//! Existing placements are read through an injected [`ReplicaLister`]; the
//! engine itself performs no I/O.
//!
//! # Architecture
//!
//! ```text
//! candidates ──► Selection ──► policy 1 ──► policy 2 ──► ... ──► eligible pools
//!                                 │            │
//!                                 └────┬───────┘
//!                                      ▼
//!                                ReplicaLister (existing placement records)
//! ```
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use poolselect::{anti_affinity_label, InMemoryReplicaLister, PolicyContext, Selection};
//! use poolselect_core::{AffinityLabel, LabelKeys, PlacementRecord, PoolUid};
//!
//! let keys = LabelKeys::default();
//! let lister = Arc::new(InMemoryReplicaLister::new());
//! lister.insert(PlacementRecord::placed(
//!     "vol-1-rep-1",
//!     &keys,
//!     &AffinityLabel::from("vol-1"),
//!     &PoolUid::from("pool-a"),
//! ));
//!
//! let ctx = PolicyContext::new(lister);
//! let pools = vec![PoolUid::from("pool-a"), PoolUid::from("pool-b")];
//! let selection = Selection::new(pools, &ctx, [anti_affinity_label("vol-1")]);
//!
//! selection.validate().unwrap();
//! assert_eq!(selection.filter().unwrap(), vec![PoolUid::from("pool-b")]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod lister;
pub mod option;
pub mod policy;
pub mod registry;
pub mod selection;

pub use lister::{FailingReplicaLister, InMemoryReplicaLister, ReplicaLister};
pub use option::{anti_affinity_label, prefer_anti_affinity_label, BuildOption};
pub use policy::{AntiAffinityLabel, Policy, PolicyContext, PolicyName, PreferAntiAffinityLabel};
pub use registry::{resolve_rules, template_functions, TemplateFunction};
pub use selection::{filter, Selection};
