use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

/// User record in the database. Never serialized outward as-is; responses go
/// through [`crate::users::dto::PublicUser`], which carries no hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at, updated_at
            FROM users
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(db)
        .await
    }

    /// Insert a new user. `password_hash` must already be hashed; this layer
    /// never sees plaintext.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }

    /// Partial profile update. A `None` leaves the column untouched, so an
    /// update that carries no new password keeps the stored hash
    /// byte-identical.
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }

    /// Delete a user; owned news and comments go with it via FK cascade.
    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
