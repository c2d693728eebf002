//! Compilation model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::event::EventShortDto;
use crate::utils::errors::{EwmError, Result};

#[derive(Debug, Clone, FromRow)]
pub struct Compilation {
    pub id: i64,
    pub title: String,
    pub pinned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompilationDto {
    pub events: Option<Vec<i64>>,
    #[serde(default)]
    pub pinned: bool,
    pub title: String,
}

impl NewCompilationDto {
    pub fn validate(&self) -> Result<()> {
        let len = self.title.trim().chars().count();
        if len == 0 || len > 50 {
            return Err(EwmError::InvalidInput(
                "Compilation title must be between 1 and 50 characters".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompilationRequest {
    pub events: Option<Vec<i64>>,
    pub pinned: Option<bool>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationDto {
    pub events: Vec<EventShortDto>,
    pub id: i64,
    pub pinned: bool,
    pub title: String,
}
