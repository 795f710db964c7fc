use uuid::Uuid;

use crate::error::AppError;
use crate::users::repo::{User, UserRole};

/// Allow only the resource's owner. Evaluated after authentication and after
/// the target row has been loaded; a denial terminates the request before
/// any mutation.
pub fn ensure_owner(user: &User, owner_id: Uuid, denial: &str) -> Result<(), AppError> {
    if user.id == owner_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(denial.to_string()))
    }
}

/// Allow the owner, or an admin acting as moderator.
pub fn ensure_owner_or_admin(user: &User, owner_id: Uuid, denial: &str) -> Result<(), AppError> {
    if user.id == owner_id || user.role == UserRole::Admin {
        Ok(())
    } else {
        Err(AppError::Forbidden(denial.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn user_with_role(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Karim Hossain".into(),
            email: "karim@example.com".into(),
            password_hash: "hash".into(),
            role,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn owner_passes_both_checks() {
        let user = user_with_role(UserRole::User);
        assert!(ensure_owner(&user, user.id, "denied").is_ok());
        assert!(ensure_owner_or_admin(&user, user.id, "denied").is_ok());
    }

    #[test]
    fn non_owner_is_forbidden_with_the_given_message() {
        let user = user_with_role(UserRole::User);
        let err = ensure_owner(&user, Uuid::new_v4(), "You can only update your own news")
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(err.to_string(), "You can only update your own news");
    }

    #[test]
    fn admin_passes_moderation_but_not_plain_ownership() {
        let admin = user_with_role(UserRole::Admin);
        let other = Uuid::new_v4();
        assert!(ensure_owner_or_admin(&admin, other, "denied").is_ok());
        assert!(ensure_owner(&admin, other, "denied").is_err());
    }
}
