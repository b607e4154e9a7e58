//! User-facing failure notices.
//!
//! Failures are logged where they happen and surfaced as a `Notice`; the
//! host decides how to present it. Nothing is retried.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub const PROPERTY_NOT_FOUND: &str = "Property not found";
pub const FAILED_TO_LOAD_PROPERTY: &str = "Failed to load property";
pub const FAILED_TO_LOAD_PROPERTIES: &str = "Error loading properties";
pub const FAILED_TO_CREATE_PROPERTY: &str = "Failed to create property";
pub const FAILED_TO_UPDATE_PROPERTY: &str = "Failed to update property";
pub const FAILED_TO_DELETE_PROPERTY: &str = "Failed to delete property";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Blocking alert; the current view stays as it was.
    Alert,
    /// Inline error panel replacing the view body.
    Panel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Alert,
            message: message.into(),
        }
    }

    pub fn panel(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Panel,
            message: message.into(),
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Notice {}
