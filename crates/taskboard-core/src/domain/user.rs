//! User record.

use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user, as stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Unique identifier, generated by the database when not supplied.
    pub id: UserId,
    /// Display name, at most 100 characters.
    pub full_name: String,
    /// Email address, unique across all users.
    pub email: String,
    /// Creation timestamp, set by the database.
    pub created_at: DateTime<Utc>,
}
