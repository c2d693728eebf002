//! Comment service

use tracing::info;

use crate::database::DatabaseService;
use crate::models::comment::{Comment, CommentDto, NewCommentDto};
use crate::utils::datetime;
use crate::utils::errors::{EwmError, Result};

#[derive(Debug, Clone)]
pub struct CommentService {
    db: DatabaseService,
}

impl CommentService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Add a comment to an event
    pub async fn post_comment(
        &self,
        user_id: i64,
        event_id: i64,
        dto: NewCommentDto,
    ) -> Result<CommentDto> {
        dto.validate()?;
        self.require_user(user_id).await?;
        self.db
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(EwmError::EventNotFound { event_id })?;
        let comment = self
            .db
            .comments
            .create(&dto.text, event_id, user_id, datetime::now())
            .await?;
        info!(comment_id = comment.id, event_id = event_id, "Comment created");
        Ok(CommentDto::from(&comment))
    }

    /// Edit a comment; only its author may do so
    pub async fn patch_comment(
        &self,
        user_id: i64,
        comment_id: i64,
        dto: NewCommentDto,
    ) -> Result<CommentDto> {
        dto.validate()?;
        self.require_user(user_id).await?;
        let comment = self.require_comment(comment_id).await?;
        if comment.author_id != user_id {
            return Err(EwmError::NotCommentAuthor { user_id, comment_id });
        }
        let updated = self.db.comments.update_text(comment_id, &dto.text).await?;
        Ok(CommentDto::from(&updated))
    }

    /// Delete a comment; only its author may do so
    pub async fn delete_comment(&self, user_id: i64, comment_id: i64) -> Result<()> {
        self.require_user(user_id).await?;
        let comment = self.require_comment(comment_id).await?;
        if comment.author_id != user_id {
            return Err(EwmError::NotCommentAuthor { user_id, comment_id });
        }
        self.db.comments.delete(comment_id).await?;
        info!(comment_id = comment_id, user_id = user_id, "Comment deleted");
        Ok(())
    }

    /// Admin delete, no author check
    pub async fn delete_comment_by_admin(&self, comment_id: i64) -> Result<()> {
        self.require_comment(comment_id).await?;
        self.db.comments.delete(comment_id).await?;
        info!(comment_id = comment_id, "Comment deleted by admin");
        Ok(())
    }

    /// All comments on one event, oldest first
    pub async fn get_comments(&self, event_id: i64) -> Result<Vec<CommentDto>> {
        self.db
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(EwmError::EventNotFound { event_id })?;
        let comments = self.db.comments.find_by_event(event_id).await?;
        Ok(comments.iter().map(CommentDto::from).collect())
    }

    async fn require_user(&self, user_id: i64) -> Result<()> {
        self.db
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(EwmError::UserNotFound { user_id })?;
        Ok(())
    }

    async fn require_comment(&self, comment_id: i64) -> Result<Comment> {
        self.db
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or(EwmError::CommentNotFound { comment_id })
    }
}
