//! Core types and utilities for poolselect.
//!
//! This crate provides the building blocks shared by the policy engine:
//! - Error types
//! - Configuration management and logging setup
//! - The placement data model (pool UIDs, affinity labels, placement records)
//! - Equality label selectors used to query placement records

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod selector;
pub mod types;

pub use config::{Config, LogFormat, LoggingConfig, RuleSpec};
pub use error::{Error, Result};
pub use selector::LabelSelector;
pub use types::{AffinityLabel, LabelKeys, ListOptions, PlacementRecord, PoolUid};
