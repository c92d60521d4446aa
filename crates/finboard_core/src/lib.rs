//! finboard_core - Shared types and plumbing for the finboard client
//!
//! This crate provides the foundational pieces used across the client crates:
//! - `config` - configuration file + environment overrides
//! - `paths` - on-disk locations and JSON persistence helpers
//! - `domain` - user, account, transaction and budget records

pub mod config;
pub mod domain;
pub mod paths;

// Re-export commonly used types
pub use config::Config;
pub use domain::{
    Account, AccountKind, Budget, NewTransaction, Transaction, TransactionKind, User,
};
