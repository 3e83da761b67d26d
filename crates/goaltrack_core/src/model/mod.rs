//! Domain model for goals and their journal history.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep displayed progress a derived value, never a stored field.
//!
//! # Invariants
//! - Every domain object is identified by a stable UUID.
//! - Journal entries are immutable once created.

pub mod goal;
pub mod journal;
