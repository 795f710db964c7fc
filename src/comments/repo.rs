use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub body: String,
    pub user_id: Uuid,
    pub news_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Comment row joined with its author's public columns.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithUser {
    pub id: Uuid,
    pub body: String,
    pub user_id: Uuid,
    pub news_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub user_name: String,
    pub user_email: String,
}

pub async fn list_by_news(db: &PgPool, news_id: Uuid) -> sqlx::Result<Vec<CommentWithUser>> {
    sqlx::query_as::<_, CommentWithUser>(
        r#"
        SELECT c.id, c.body, c.user_id, c.news_id, c.created_at, c.updated_at,
               u.name AS user_name, u.email AS user_email
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.news_id = $1
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(news_id)
    .fetch_all(db)
    .await
}

/// Comments for a whole page of articles in one query.
pub async fn list_for_news_ids(
    db: &PgPool,
    news_ids: &[Uuid],
) -> sqlx::Result<Vec<CommentWithUser>> {
    sqlx::query_as::<_, CommentWithUser>(
        r#"
        SELECT c.id, c.body, c.user_id, c.news_id, c.created_at, c.updated_at,
               u.name AS user_name, u.email AS user_email
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.news_id = ANY($1)
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(news_ids)
    .fetch_all(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Comment>> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, body, user_id, news_id, created_at, updated_at
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn find_with_user(db: &PgPool, id: Uuid) -> sqlx::Result<Option<CommentWithUser>> {
    sqlx::query_as::<_, CommentWithUser>(
        r#"
        SELECT c.id, c.body, c.user_id, c.news_id, c.created_at, c.updated_at,
               u.name AS user_name, u.email AS user_email
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Insert a comment; both FKs are set once here and never reassigned.
pub async fn create(
    db: &PgPool,
    body: &str,
    user_id: Uuid,
    news_id: Uuid,
) -> sqlx::Result<Comment> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (body, user_id, news_id)
        VALUES ($1, $2, $3)
        RETURNING id, body, user_id, news_id, created_at, updated_at
        "#,
    )
    .bind(body)
    .bind(user_id)
    .bind(news_id)
    .fetch_one(db)
    .await
}

pub async fn update(db: &PgPool, id: Uuid, body: &str) -> sqlx::Result<Comment> {
    sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET body = $2, updated_at = now()
        WHERE id = $1
        RETURNING id, body, user_id, news_id, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(body)
    .fetch_one(db)
    .await
}

pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
