//! # Taskboard Server Library
//!
//! Wiring of the storage, service, and REST layers, plus startup
//! utilities for the server binary.

pub mod app;
pub mod startup;
