// src/services/auth.rs

use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    models::auth::{Claims, User},
};

// Audiência dos tokens de sessão emitidos pelo provedor de identidade
pub const TOKEN_AUDIENCE: &str = "authenticated";

/// Portão de identidade: valida o token emitido pelo provedor externo.
/// Login, cadastro e senha ficam todos do lado do provedor.
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: Option<String>,
}

impl AuthService {
    pub fn new(jwt_secret: Option<String>) -> Self {
        Self { jwt_secret }
    }

    pub fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let secret = self
            .jwt_secret
            .as_deref()
            .ok_or_else(|| AppError::Config("IDENTITY_JWT_SECRET ausente.".into()))?;

        let mut validation = Validation::default();
        validation.set_audience(&[TOKEN_AUDIENCE]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("Token rejeitado: {}", e);
            AppError::InvalidToken
        })?;

        Ok(User {
            id: token_data.claims.sub,
            email: token_data.claims.email.map(|e| e.trim().to_lowercase()),
        })
    }
}

#[cfg(test)]
pub mod test_support {
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    use super::TOKEN_AUDIENCE;
    use crate::models::auth::Claims;

    /// Emite um token como o provedor de identidade faria.
    pub fn issue_token(secret: &str, user_id: Uuid, email: Option<&str>) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.map(str::to_string),
            aud: TOKEN_AUDIENCE.to_string(),
            exp: (now + chrono::Duration::hours(1)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_ref())).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::{test_support::issue_token, *};
    use uuid::Uuid;

    #[test]
    fn accepts_tokens_signed_with_the_secret() {
        let service = AuthService::new(Some("segredo".into()));
        let user_id = Uuid::new_v4();
        let token = issue_token("segredo", user_id, Some("Pastor@Graca.org"));

        let user = service.validate_token(&token).unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.email.as_deref(), Some("pastor@graca.org"));
    }

    #[test]
    fn rejects_tokens_signed_with_another_secret() {
        let service = AuthService::new(Some("segredo".into()));
        let token = issue_token("outro", Uuid::new_v4(), None);

        assert!(matches!(service.validate_token(&token), Err(AppError::InvalidToken)));
        assert!(matches!(service.validate_token("lixo"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn fails_closed_without_secret() {
        let service = AuthService::new(None);
        assert!(matches!(service.validate_token("qualquer"), Err(AppError::Config(_))));
    }
}
