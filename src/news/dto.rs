use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::comments::dto::CommentItem;
use crate::error::FieldError;
use crate::news::repo::NewsWithAuthor;
use crate::users::dto::UserSummary;

/// Whitelisted sort columns for the news listing.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NewsSort {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
}

impl NewsSort {
    pub fn column(self) -> &'static str {
        match self {
            NewsSort::CreatedAt => "created_at",
            NewsSort::UpdatedAt => "updated_at",
            NewsSort::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub enum SortOrder {
    #[serde(alias = "asc")]
    #[serde(rename = "ASC")]
    Asc,
    #[default]
    #[serde(alias = "desc")]
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewsListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub sort: NewsSort,
    #[serde(default)]
    pub order: SortOrder,
}

fn default_page() -> i64 {
    1
}
fn default_limit() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct CreateNewsRequest {
    pub title: String,
    pub body: String,
}

impl CreateNewsRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validate_title(Some(&self.title), &mut errors);
        validate_body(Some(&self.body), &mut errors);
        errors
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateNewsRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl UpdateNewsRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validate_title(self.title.as_deref(), &mut errors);
        validate_body(self.body.as_deref(), &mut errors);
        errors
    }
}

fn validate_title(title: Option<&str>, errors: &mut Vec<FieldError>) {
    if let Some(title) = title {
        let len = title.trim().chars().count();
        if !(5..=255).contains(&len) {
            errors.push(FieldError::new(
                "title",
                "Title must be between 5 and 255 characters",
            ));
        }
    }
}

fn validate_body(body: Option<&str>, errors: &mut Vec<FieldError>) {
    if let Some(body) = body {
        if body.trim().chars().count() < 10 {
            errors.push(FieldError::new("body", "Body must be at least 10 characters"));
        }
    }
}

/// Article as serialized outward: author embedded, comments included.
#[derive(Debug, Serialize)]
pub struct NewsItem {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author: UserSummary,
    pub comments: Vec<CommentItem>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl NewsItem {
    pub fn from_row(row: NewsWithAuthor, comments: Vec<CommentItem>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            body: row.body,
            author: UserSummary {
                id: row.author_id,
                name: row.author_name,
                email: row.author_email,
            },
            comments,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewsData {
    pub news: NewsItem,
}

#[derive(Debug, Serialize)]
pub struct NewsPage {
    pub count: usize,
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub news: Vec<NewsItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_enforces_title_and_body_bounds() {
        let req = CreateNewsRequest {
            title: "1234".into(),
            body: "too short".into(),
        };
        let fields: Vec<_> = req.validate().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "body"]);

        let ok = CreateNewsRequest {
            title: "Govt Announces New Tech Park".into(),
            body: "A new state-of-the-art tech park will be established.".into(),
        };
        assert!(ok.validate().is_empty());
    }

    #[test]
    fn update_request_ignores_absent_fields() {
        let req = UpdateNewsRequest {
            title: None,
            body: None,
        };
        assert!(req.validate().is_empty());
    }

    #[test]
    fn sort_whitelist_maps_to_fixed_columns() {
        assert_eq!(NewsSort::CreatedAt.column(), "created_at");
        assert_eq!(NewsSort::Title.column(), "title");
        assert_eq!(SortOrder::Asc.keyword(), "ASC");
        assert_eq!(SortOrder::Desc.keyword(), "DESC");
    }

    #[test]
    fn list_query_defaults() {
        let q: NewsListQuery = serde_json::from_str("{}").expect("defaults");
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 10);
        assert_eq!(q.order, SortOrder::Desc);
        assert_eq!(q.sort.column(), "created_at");
    }

    #[test]
    fn list_query_accepts_original_casing() {
        let q: NewsListQuery =
            serde_json::from_str(r#"{"sort":"createdAt","order":"DESC","page":2,"limit":5}"#)
                .expect("parse");
        assert_eq!(q.page, 2);
        assert_eq!(q.limit, 5);
        assert_eq!(q.sort.column(), "created_at");
        assert_eq!(q.order, SortOrder::Desc);
    }
}
