//! Recognition session module
//!
//! This module contains:
//! - Session state (options, images, results, view)
//! - Message and effect types
//! - Message handlers
//! - The status log

pub mod handlers;
pub mod messages;
pub mod state;
pub mod status;
