//! User service trait definition.

use crate::dto::{CreateUserRequest, UserResponse};
use async_trait::async_trait;
use taskboard_core::{TaskboardResult, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Creates a new user. A duplicate email is rejected.
    async fn create_user(&self, request: CreateUserRequest) -> TaskboardResult<UserResponse>;

    /// Gets a user by ID.
    async fn get_user(&self, id: UserId) -> TaskboardResult<UserResponse>;

    /// Deletes a user together with the tasks they authored. Deleting a
    /// missing user succeeds.
    async fn delete_user(&self, id: UserId) -> TaskboardResult<()>;
}
