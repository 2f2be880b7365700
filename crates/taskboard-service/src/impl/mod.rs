//! Service implementations.

mod task_service_impl;
mod user_service_impl;

pub use task_service_impl::TaskServiceImpl;
pub use user_service_impl::UserServiceImpl;
