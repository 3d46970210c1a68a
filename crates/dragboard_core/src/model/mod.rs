//! Board domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by the store and views.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - There is no delete path; projects only change status.

pub mod project;
