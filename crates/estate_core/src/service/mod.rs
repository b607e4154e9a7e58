//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep views and hosts decoupled from storage details.

pub mod property_service;
