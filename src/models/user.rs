//! User model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::{EwmError, Result};

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserRequest {
    pub name: String,
    pub email: String,
}

impl NewUserRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(EwmError::InvalidInput("User name must not be blank".to_string()));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(EwmError::InvalidInput(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Short projection embedded in event DTOs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserShortDto {
    pub id: i64,
    pub name: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<&User> for UserShortDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_rejected() {
        let request = NewUserRequest {
            name: "  ".to_string(),
            email: "ann@example.com".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_email_without_at_is_rejected() {
        let request = NewUserRequest {
            name: "Ann".to_string(),
            email: "ann.example.com".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_valid_request_passes() {
        let request = NewUserRequest {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
