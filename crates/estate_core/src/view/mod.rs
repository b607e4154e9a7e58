//! Views: table, forms, detail rendering and route-level page handlers.
//!
//! Views render plain text for terminal hosts; sorting and validation are
//! independent of any rendering backend.

pub mod detail;
pub mod form;
pub mod page;
pub mod table;
