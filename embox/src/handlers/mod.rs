//! Endpoint logic, independent of the HTTP framework.

mod list;
mod views;

pub use list::ListParams;

/// Prefix of the `error` text when the item list cannot be fetched.
pub const LIST_CONTEXT: &str = "Failed to fetch Emby list";

/// Prefix of the `error` text when the views cannot be fetched.
pub const VIEWS_CONTEXT: &str = "Failed to fetch Emby views";
