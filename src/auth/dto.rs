use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::users::dto::PublicUser;
use crate::validate::is_valid_email;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let name_len = self.name.chars().count();
        if !(2..=100).contains(&name_len) {
            errors.push(FieldError::new(
                "name",
                "Name must be between 2 and 100 characters",
            ));
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "Must be a valid email address"));
        }
        if self.password.chars().count() < 6 {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 6 characters",
            ));
        }
        errors
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "Must be a valid email address"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        errors
    }
}

/// Payload of register/login responses: the public user plus a fresh token.
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: PublicUser,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_scenario_payload_is_valid() {
        let req = RegisterRequest {
            name: "Alice".into(),
            email: "alice@x.com".into(),
            password: "secret123".into(),
        };
        assert!(req.validate().is_empty());
    }

    #[test]
    fn register_rejects_short_password_and_bad_email() {
        let req = RegisterRequest {
            name: "Alice".into(),
            email: "alice-at-x".into(),
            password: "12345".into(),
        };
        let fields: Vec<_> = req.validate().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn login_requires_well_formed_email() {
        let req = LoginRequest {
            email: "nope".into(),
            password: "secret123".into(),
        };
        assert_eq!(req.validate().len(), 1);
    }
}
