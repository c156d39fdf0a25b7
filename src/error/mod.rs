//! Error module orchestrator.
//!
//! `BoardError` covers construction and session misuse; `Rejection` is the
//! quiet "nothing changed" signal returned by the reconcilers.

mod types;

pub use types::{BoardError, Rejection, Result};
