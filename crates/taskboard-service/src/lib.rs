//! # Taskboard Service
//!
//! Use cases for users and tasks. Each public operation runs inside one
//! unit of work and narrows repository errors into [`TaskboardError`]
//! categories with a user-facing message.
//!
//! [`TaskboardError`]: taskboard_core::TaskboardError

pub mod dto;
mod errors;
pub mod r#impl;
pub mod task_service;
pub mod user_service;

pub use dto::*;
pub use errors::messages;
pub use r#impl::{TaskServiceImpl, UserServiceImpl};
pub use task_service::*;
pub use user_service::*;
