//! dupsweep - Duplicate File Remover
//!
//! Finds files with identical content by SHA-256 and removes redundant copies,
//! either by operator selection from a numbered listing or automatically by
//! keeping the first-discovered file of every group.

pub mod actions;
pub mod app;
pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

pub use app::{run_app, run_session};
