use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Taxonomia única de erros da aplicação. Toda fronteira HTTP converte para `{ "error": ... }`.
#[derive(Debug, Error)]
pub enum AppError {
    // Variável de ambiente ausente: a funcionalidade dependente falha fechada
    #[error("{0}")]
    Config(String),

    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Token inválido")]
    InvalidToken,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    // Mensagem repassada do processador de pagamento ou do provedor de identidade
    #[error("{0}")]
    Upstream(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("{0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) | AppError::Upstream(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Config(_) | AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converte violação de unicidade em `Conflict`; demais erros do banco seguem como estão.
    pub fn from_unique_violation(e: sqlx::Error, message: &str) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::Conflict(message.to_string());
            }
        }
        AppError::DatabaseError(e)
    }
}

// Corpo JSON rejeitado pelo extrator (sintaxe, tipos ou content-type)
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Corpo da requisição inválido: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error_message = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::InvalidToken => "Token de autenticação inválido ou ausente.".to_string(),
            AppError::DatabaseError(ref e) => {
                tracing::error!("Erro de banco de dados: {}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
            ref e @ (AppError::Config(_) | AppError::InternalServerError(_)) => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                e.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(AppError::Config("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Upstream("x".into()).status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upstream_message_is_passed_through() {
        let response = AppError::Upstream("Your card was declined.".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Your card was declined.");
    }

    #[tokio::test]
    async fn database_errors_hide_details() {
        let response = AppError::DatabaseError(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Ocorreu um erro inesperado.");
    }
}
