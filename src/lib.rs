//! # gh-labels
//!
//! A command-line client for managing GitHub repository labels
//!
//! ## Features
//! - Single-label CRUD by name
//! - Bulk copy between repositories (default labels excluded)
//! - Bulk clear
//! - JSON snapshot export/import with idempotent import semantics

pub mod batch;
pub mod commands;
pub mod error;
pub mod github;
pub mod snapshot;

pub use batch::{run_batch, BatchSummary, Outcome};
pub use error::{Error, Result};
pub use github::{Label, LabelClient, LabelPatch, NewLabel};
pub use snapshot::Snapshot;
