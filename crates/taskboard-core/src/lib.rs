//! # Taskboard Core
//!
//! Core types, traits, and error definitions for Taskboard.
//! This crate holds the domain records shared by the repository, service,
//! and transport layers, together with the service-facing error type.

pub mod domain;
pub mod error;
pub mod id;
pub mod patch;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use validation::*;
