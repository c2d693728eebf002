//! Category model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::{EwmError, Result};

#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategoryDto {
    pub name: String,
}

impl NewCategoryDto {
    pub fn validate(&self) -> Result<()> {
        let len = self.name.trim().chars().count();
        if len == 0 || len > 50 {
            return Err(EwmError::InvalidInput(
                "Category name must be between 1 and 50 characters".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
}

impl From<&Category> for CategoryDto {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
        }
    }
}
