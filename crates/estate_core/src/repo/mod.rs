//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the property persistence contract used by services and views.
//! - Isolate SQLite query details from use-case orchestration.
//!
//! # Invariants
//! - Repository writes validate records before persistence.
//! - Missing rows are reported as `None`/`false`, not as transport errors.

pub mod property_repo;
