//! Comment model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::datetime::date_format;
use crate::utils::errors::{EwmError, Result};

#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub event_id: i64,
    pub author_id: i64,
    pub created: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommentDto {
    pub text: String,
}

impl NewCommentDto {
    pub fn validate(&self) -> Result<()> {
        let len = self.text.trim().chars().count();
        if len == 0 || len > 2000 {
            return Err(EwmError::InvalidInput(
                "Comment text must be between 1 and 2000 characters".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i64,
    pub text: String,
    pub event: i64,
    pub author: i64,
    #[serde(with = "date_format")]
    pub created: NaiveDateTime,
}

impl From<&Comment> for CommentDto {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text.clone(),
            event: comment.event_id,
            author: comment.author_id,
            created: comment.created,
        }
    }
}
