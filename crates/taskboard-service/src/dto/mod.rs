//! Data Transfer Objects for the service layer.

mod task_dto;
mod user_dto;

pub use task_dto::*;
pub use user_dto::*;
