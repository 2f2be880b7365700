//! User-related DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::rules::not_blank;
use taskboard_core::{User, UserId};
use taskboard_repository::NewUser;
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(
        length(max = 100, message = "Full name cannot exceed 100 characters"),
        custom(function = "not_blank", message = "Full name cannot be blank")
    )]
    pub full_name: String,

    #[validate(
        email(message = "Invalid email address"),
        length(max = 120, message = "Email cannot exceed 120 characters")
    )]
    pub email: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            full_name: request.full_name,
            email: request.email,
        }
    }
}

/// User response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
