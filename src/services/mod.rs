//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on request parsing and status mapping.

pub mod account;
pub mod cloud_sync;
pub mod habit;
pub mod password;
pub mod progress;

/// Treat `None`, `""` and whitespace-only strings as a missing field.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
