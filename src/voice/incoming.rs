use super::respond_with;
use crate::{
    error::AppError,
    settings::Settings,
    twilio::twiml::{Say, Twiml},
};
use axum::{response::Response, Extension};

pub async fn welcome_handler(settings: Extension<Settings>) -> Result<Response, AppError> {
    respond_with(generate_greeting_twiml(&settings.texts.welcome))
}

/// Answers calls placed to a client of this application.
pub async fn incoming_handler(settings: Extension<Settings>) -> Result<Response, AppError> {
    log::debug!("Answering an inbound call");
    respond_with(generate_greeting_twiml(&settings.texts.inbound_greeting))
}

/// Generate a TwiML document that speaks `text` and ends the call.
pub fn generate_greeting_twiml(text: &str) -> Twiml {
    let mut twiml = Twiml::new();

    twiml.add(Say::new(text));

    twiml
}
