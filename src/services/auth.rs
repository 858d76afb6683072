// src/services/auth.rs

use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    models::auth::{Claims, SessionUser},
};

// Sign-in happens at the hosted auth provider; here we only check its tokens.
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    pub fn validate_token(&self, token: &str) -> Result<SessionUser, AppError> {
        let mut validation = Validation::default();
        // Hosted providers put their project name in `aud`; we don't pin it.
        validation.validate_aud = false;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(SessionUser {
            id: token_data.claims.sub,
            token: token.to_string(),
            issued_at: token_data.claims.iat as i64,
            expires_at: token_data.claims.exp as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    fn token_for(sub: Uuid, secret: &str, expires_in: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub,
            exp: (now + expires_in) as usize,
            iat: now as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_ref())).unwrap()
    }

    #[test]
    fn accepts_token_signed_with_shared_secret() {
        let sub = Uuid::new_v4();
        let token = token_for(sub, "secret", 3600);
        let user = AuthService::new("secret".into()).validate_token(&token).unwrap();
        assert_eq!(user.id, sub);
        assert_eq!(user.token, token);
        assert_eq!(user.expires_at - user.issued_at, 3600);
    }

    #[test]
    fn rejects_wrong_secret_and_expired_tokens() {
        let service = AuthService::new("secret".into());
        let forged = token_for(Uuid::new_v4(), "other", 3600);
        assert!(matches!(service.validate_token(&forged), Err(AppError::InvalidToken)));

        let expired = token_for(Uuid::new_v4(), "secret", -3600);
        assert!(matches!(service.validate_token(&expired), Err(AppError::InvalidToken)));
    }
}
