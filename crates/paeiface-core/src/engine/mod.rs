//! # Engine Module
//!
//! Configuration, error taxonomy, progress reporting and the computational tasks
//! of the interface contact engine.
//!
//! - **Configuration** ([`config`]) - tier ceilings, spatial cutoff and batch settings
//! - **Errors** ([`error`]) - per-interaction failure taxonomy
//! - **Progress** ([`progress`]) - callback-based progress events for front ends
//! - **State** ([`state`]) - lifecycle of one interaction in a batch run
//! - **Context** ([`context`]) - geometry capability trait and shared analysis inputs
//! - **Tasks** ([`tasks`]) - chain boundary resolution, contact analysis, summary

pub mod config;
pub mod context;
pub mod error;
pub mod progress;
pub mod state;
pub mod tasks;
