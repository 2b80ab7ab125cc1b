//! Collaborator interfaces and helpers shared by the calendar modules.

pub mod api;
pub mod date_utils;
pub mod thumbnail_cache;
