//! Barcode recognition
//!
//! This module consolidates:
//! - The engine boundary (engine.rs)
//! - The single decode call and its error taxonomy (orchestrator.rs)
//! - Off-thread execution with an in-flight guard (worker.rs)

pub mod engine;
pub mod orchestrator;
pub mod worker;
