use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::comments::repo::CommentWithUser;
use crate::error::FieldError;
use crate::users::dto::UserSummary;

/// Comment as serialized outward, with its author embedded.
#[derive(Debug, Serialize)]
pub struct CommentItem {
    pub id: Uuid,
    pub body: String,
    pub news_id: Uuid,
    pub user: UserSummary,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<CommentWithUser> for CommentItem {
    fn from(row: CommentWithUser) -> Self {
        Self {
            id: row.id,
            body: row.body,
            news_id: row.news_id,
            user: UserSummary {
                id: row.user_id,
                name: row.user_name,
                email: row.user_email,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub body: String,
}

pub fn validate_comment_body(body: &str) -> Vec<FieldError> {
    let len = body.trim().chars().count();
    if !(1..=1000).contains(&len) {
        vec![FieldError::new(
            "body",
            "Comment must be between 1 and 1000 characters",
        )]
    } else {
        Vec::new()
    }
}

#[derive(Debug, Serialize)]
pub struct CommentData {
    pub comment: CommentItem,
}

#[derive(Debug, Serialize)]
pub struct CommentList {
    pub count: usize,
    pub comments: Vec<CommentItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_bounds() {
        assert!(!validate_comment_body("").is_empty());
        assert!(!validate_comment_body("   ").is_empty());
        assert!(!validate_comment_body(&"x".repeat(1001)).is_empty());
        assert!(validate_comment_body("nice article").is_empty());
        assert!(validate_comment_body(&"x".repeat(1000)).is_empty());
    }
}
