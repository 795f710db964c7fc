use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::FieldError;
use crate::users::repo::{User, UserRole};
use crate::validate::is_valid_email;

/// Public projection of a user; the password hash never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Minimal user projection embedded in news and comment payloads.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            let len = name.trim().chars().count();
            if !(2..=100).contains(&len) {
                errors.push(FieldError::new(
                    "name",
                    "Name must be between 2 and 100 characters",
                ));
            }
        }
        if let Some(email) = &self.email {
            if !is_valid_email(email.trim()) {
                errors.push(FieldError::new("email", "Must be a valid email address"));
            }
        }
        if let Some(password) = &self.password {
            if password.chars().count() < 6 {
                errors.push(FieldError::new(
                    "password",
                    "Password must be at least 6 characters",
                ));
            }
        }
        errors
    }
}

#[derive(Debug, Serialize)]
pub struct UserData {
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct UserList {
    pub count: usize,
    pub users: Vec<PublicUser>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Alice Rahman".into(),
            email: "alice@example.com".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".into(),
            role: UserRole::User,
            created_at: datetime!(2025-12-04 10:00 UTC),
            updated_at: datetime!(2025-12-04 10:00 UTC),
        }
    }

    #[test]
    fn public_user_never_serializes_password_material() {
        let json = serde_json::to_string(&PublicUser::from(sample_user())).expect("serialize");
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("alice@example.com"));
        assert!(json.contains(r#""role":"user""#));
    }

    #[test]
    fn update_request_accepts_absent_fields() {
        let req = UpdateUserRequest {
            name: None,
            email: None,
            password: None,
        };
        assert!(req.validate().is_empty());
    }

    #[test]
    fn update_request_flags_each_bad_field() {
        let req = UpdateUserRequest {
            name: Some("A".into()),
            email: Some("not-an-email".into()),
            password: Some("short".into()),
        };
        let errors = req.validate();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "email", "password"]);
    }
}
