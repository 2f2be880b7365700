//! User repository.

use crate::entity::{Fields, UserColumn};
use crate::error::UserError;
use crate::sql_repository::SqlRepository;
use sqlx::PgConnection;
use std::ops::{Deref, DerefMut};
use taskboard_core::{User, UserId};
use tracing::{debug, info, warn};

/// Values for a new user; identifier and timestamp are assigned by the
/// database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
}

impl From<NewUser> for Fields<User> {
    fn from(user: NewUser) -> Self {
        Self::new()
            .with(UserColumn::FullName, user.full_name)
            .with(UserColumn::Email, user.email)
    }
}

/// Repository for the `users` table.
///
/// Derefs to the generic [`SqlRepository`], so every generic operation is
/// available as well.
pub struct UserRepository<'c> {
    repo: SqlRepository<'c, User>,
}

impl<'c> UserRepository<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self {
            repo: SqlRepository::new(conn),
        }
    }

    /// Creates a user. A duplicate email fails with [`UserError::Create`].
    pub async fn create_user(&mut self, user: NewUser) -> Result<User, UserError> {
        debug!("Creating user with email: {}", user.email);
        let created = self
            .repo
            .add_one_and_get_obj(user.into())
            .await
            .map_err(|e| {
                warn!("User creation rejected: {}", e);
                UserError::from(e)
            })?;
        info!("User created: {}", created.id);
        Ok(created)
    }

    /// Fetches a user by identifier.
    pub async fn get_by_id(&mut self, id: UserId) -> Result<Option<User>, UserError> {
        debug!("Finding user by id: {}", id);
        Ok(self
            .repo
            .get_by_filter_one_or_none(Fields::new().with(UserColumn::Id, id))
            .await?)
    }

    /// Fetches a user by email.
    pub async fn get_by_email(&mut self, email: &str) -> Result<Option<User>, UserError> {
        debug!("Finding user by email: {}", email);
        Ok(self
            .repo
            .get_by_filter_one_or_none(Fields::new().with(UserColumn::Email, email))
            .await?)
    }

    /// Deletes a user, cascading to their tasks and join rows.
    /// Returns whether a row was removed.
    pub async fn delete_by_id(&mut self, id: UserId) -> Result<bool, UserError> {
        debug!("Deleting user: {}", id);
        let removed = self
            .repo
            .delete_by_filter(Fields::new().with(UserColumn::Id, id))
            .await?;
        Ok(removed > 0)
    }
}

impl<'c> Deref for UserRepository<'c> {
    type Target = SqlRepository<'c, User>;

    fn deref(&self) -> &Self::Target {
        &self.repo
    }
}

impl DerefMut for UserRepository<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.repo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::SqlValue;

    #[test]
    fn test_new_user_fields() {
        let fields: Fields<User> = NewUser {
            full_name: "First".to_string(),
            email: "first@first.com".to_string(),
        }
        .into();

        assert_eq!(fields.columns().collect::<Vec<_>>(), vec!["full_name", "email"]);
        assert_eq!(
            fields.get(UserColumn::Email),
            Some(&SqlValue::Text("first@first.com".to_string()))
        );
    }
}
