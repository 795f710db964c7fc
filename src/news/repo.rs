use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::news::dto::{NewsSort, SortOrder};

#[derive(Debug, Clone, FromRow)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// News row joined with its author's public columns.
#[derive(Debug, Clone, FromRow)]
pub struct NewsWithAuthor {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub author_name: String,
    pub author_email: String,
}

pub async fn list(
    db: &PgPool,
    sort: NewsSort,
    order: SortOrder,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<NewsWithAuthor>> {
    // Sort column and direction come from a whitelist, never from raw input.
    let sql = format!(
        r#"
        SELECT n.id, n.title, n.body, n.author_id, n.created_at, n.updated_at,
               u.name AS author_name, u.email AS author_email
        FROM news n
        JOIN users u ON u.id = n.author_id
        ORDER BY n.{} {}
        LIMIT $1 OFFSET $2
        "#,
        sort.column(),
        order.keyword(),
    );
    sqlx::query_as::<_, NewsWithAuthor>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
}

pub async fn count_all(db: &PgPool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM news")
        .fetch_one(db)
        .await
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<News>> {
    sqlx::query_as::<_, News>(
        r#"
        SELECT id, title, body, author_id, created_at, updated_at
        FROM news
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn find_with_author(db: &PgPool, id: Uuid) -> sqlx::Result<Option<NewsWithAuthor>> {
    sqlx::query_as::<_, NewsWithAuthor>(
        r#"
        SELECT n.id, n.title, n.body, n.author_id, n.created_at, n.updated_at,
               u.name AS author_name, u.email AS author_email
        FROM news n
        JOIN users u ON u.id = n.author_id
        WHERE n.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Insert an article; `author_id` is set once here and never reassigned.
pub async fn create(db: &PgPool, title: &str, body: &str, author_id: Uuid) -> sqlx::Result<News> {
    sqlx::query_as::<_, News>(
        r#"
        INSERT INTO news (title, body, author_id)
        VALUES ($1, $2, $3)
        RETURNING id, title, body, author_id, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(body)
    .bind(author_id)
    .fetch_one(db)
    .await
}

pub async fn update(
    db: &PgPool,
    id: Uuid,
    title: Option<&str>,
    body: Option<&str>,
) -> sqlx::Result<News> {
    sqlx::query_as::<_, News>(
        r#"
        UPDATE news
        SET title = COALESCE($2, title),
            body = COALESCE($3, body),
            updated_at = now()
        WHERE id = $1
        RETURNING id, title, body, author_id, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(body)
    .fetch_one(db)
    .await
}

pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM news WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
