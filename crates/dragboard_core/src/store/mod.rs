//! Application state stores.
//!
//! # Responsibility
//! - Hold the mutable board state and broadcast changes to views.
//!
//! # Invariants
//! - Views read snapshots only; all mutation goes through store methods.

pub mod project_store;
