//! Domain model for the property portfolio.
//!
//! # Responsibility
//! - Define the canonical `Property` record and its create/patch inputs.
//! - Own the field-level invariants every persistence path must enforce.
//!
//! # Invariants
//! - Every property is identified by a store-assigned `PropertyId`.
//! - Deletion is a hard delete; there are no tombstones or versions.

pub mod property;
