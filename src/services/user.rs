//! User service

use tracing::info;

use crate::database::DatabaseService;
use crate::models::user::{NewUserRequest, UserDto};
use crate::utils::errors::{EwmError, Result};
use crate::utils::helpers::Pagination;

#[derive(Debug, Clone)]
pub struct UserService {
    db: DatabaseService,
}

impl UserService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// List users, optionally restricted to a set of IDs, paged
    pub async fn get_users(&self, ids: &[i64], page: Pagination) -> Result<Vec<UserDto>> {
        let users = self.db.users.list(ids, page.limit(), page.offset()).await?;
        Ok(users.iter().map(UserDto::from).collect())
    }

    /// Create a user; the name must be unique
    pub async fn post_user(&self, request: NewUserRequest) -> Result<UserDto> {
        request.validate()?;
        if self.db.users.find_by_name(&request.name).await?.is_some() {
            return Err(EwmError::DuplicateUserName(request.name));
        }
        let user = self.db.users.create(request).await?;
        info!(user_id = user.id, "User created");
        Ok(UserDto::from(&user))
    }

    /// Delete a user
    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        self.db
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(EwmError::UserNotFound { user_id })?;
        self.db.users.delete(user_id).await?;
        info!(user_id = user_id, "User deleted");
        Ok(())
    }
}
