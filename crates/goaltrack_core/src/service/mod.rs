//! Use-case services consumed by the HTTP layer.
//!
//! # Responsibility
//! - Provide stable goal/journal entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - `now` is always supplied by the caller, never read internally, so
//!   every derived read stays reproducible.

pub mod goal_service;
pub mod journal_service;
