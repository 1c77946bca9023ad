//! Core application module
//!
//! This module contains the application driver: it owns the session,
//! the recognition worker and the native dialogs, and maps command line
//! options onto session messages.

pub mod app;
pub mod args;
