use crate::{
    secrets::MissingSecret,
    twilio::{twiml::TwimlError, TwilioError},
    voice::token::TokenError,
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Everything a handler can fail with. Each variant maps to its own status
/// code so callers can tell the failures apart.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to render TwiML: {0}")]
    Twiml(#[from] TwimlError),
    #[error("Failed to issue access token: {0}")]
    Token(#[from] TokenError),
    #[error("Twilio request failed: {0}")]
    Provider(#[from] TwilioError),
    #[error(transparent)]
    MissingConfig(#[from] MissingSecret),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Provider(_) => StatusCode::BAD_GATEWAY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Twiml(_) | AppError::Token(_) | AppError::MissingConfig(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log::error!("{self}");

        (
            self.status(),
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
