//! Map presentation: widget contract, marker reconciliation and an
//! in-memory widget backend.
//!
//! # Responsibility
//! - Keep markers, popups and camera consistent with the property list and
//!   the focused property.
//! - Tolerate a widget that failed to load.

pub mod geo;
pub mod loader;
pub mod popup;
pub mod reconciler;
pub mod scene;
pub mod widget;
