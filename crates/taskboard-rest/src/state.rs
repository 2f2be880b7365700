//! Application state for Axum handlers.

use std::sync::Arc;
use taskboard_core::HealthCheck;
use taskboard_service::{TaskService, UserService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub task_service: Arc<dyn TaskService>,
    pub database: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        task_service: Arc<dyn TaskService>,
        database: Arc<dyn HealthCheck>,
    ) -> Self {
        Self {
            user_service,
            task_service,
            database,
        }
    }
}
