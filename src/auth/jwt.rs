use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::{config::JwtConfig, error::AppError, state::AppState, users::repo::UserRole};

/// JWT payload: the user's id and role plus the standard time/issuer claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: UserRole,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

/// Signing and verification keys derived from injected configuration.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from_config(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: Duration::from_secs((cfg.ttl_minutes as u64) * 60),
        }
    }

    /// Issue a signed, time-bound token for a verified identity.
    pub fn sign(&self, user_id: Uuid, role: UserRole) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            role,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "jwt signed");
        Ok(token)
    }

    /// Verify signature, issuer, audience and expiry. An expired token is
    /// reported distinctly from a malformed or mis-signed one.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })?;
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;

    fn test_config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_minutes: 5,
        }
    }

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::from_config(&test_config(secret))
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = make_keys("dev-secret");
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id, UserRole::Admin).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
    }

    #[test]
    fn expired_token_reports_expired_not_invalid() {
        let keys = make_keys("dev-secret");
        // Encode claims whose exp is an hour in the past, well beyond the
        // default 60s validation leeway.
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: UserRole::User,
            iat: (now - 7200) as usize,
            exp: (now - 3600) as usize,
            iss: "test-issuer".into(),
            aud: "test-aud".into(),
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).expect("encode");
        let err = keys.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::TokenExpired));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let signer = make_keys("secret-a");
        let verifier = make_keys("secret-b");
        let token = signer.sign(Uuid::new_v4(), UserRole::User).expect("sign");
        let err = verifier.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn tampered_signature_is_invalid() {
        let keys = make_keys("dev-secret");
        let token = keys.sign(Uuid::new_v4(), UserRole::User).expect("sign");
        let mut tampered = token.clone();
        let last = tampered.pop().expect("token has chars");
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        let err = keys.verify(&tampered).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn tampered_payload_is_invalid() {
        let keys = make_keys("dev-secret");
        let token = keys.sign(Uuid::new_v4(), UserRole::User).expect("sign");
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);
        // Swap in a payload signed by nobody.
        let forged = format!("{}.{}.{}", parts[0], parts[0], parts[2]);
        let err = keys.verify(&forged).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn wrong_issuer_or_audience_is_invalid() {
        let signer = make_keys("same-secret");
        let mut other_cfg = test_config("same-secret");
        other_cfg.issuer = "other-issuer".into();
        other_cfg.audience = "other-aud".into();
        let verifier = JwtKeys::from_config(&other_cfg);
        let token = signer.sign(Uuid::new_v4(), UserRole::User).expect("sign");
        let err = verifier.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn garbage_is_invalid() {
        let keys = make_keys("dev-secret");
        let err = keys.verify("definitely-not-a-jwt").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
