use crate::{error::AppError, twilio::twiml::Twiml};
use axum::{
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

pub mod incoming;
pub mod make_call;
pub mod params;
pub mod place_call;
pub mod token;

/// Every route answers GET with query parameters and POST with a
/// urlencoded form body, see `params::Params`.
pub fn router() -> Router {
    Router::new()
        .route("/", get(incoming::welcome_handler).post(incoming::welcome_handler))
        .route(
            "/accessToken",
            get(token::access_token_handler).post(token::access_token_handler),
        )
        .route(
            "/makeCall",
            get(make_call::make_call_handler).post(make_call::make_call_handler),
        )
        .route(
            "/placeCall",
            get(place_call::place_call_handler).post(place_call::place_call_handler),
        )
        .route(
            "/incoming",
            get(incoming::incoming_handler).post(incoming::incoming_handler),
        )
        .route(
            "/incomingCall",
            get(incoming::incoming_handler).post(incoming::incoming_handler),
        )
}

/// Renders a document as an XML response.
fn respond_with(twiml: Twiml) -> Result<Response, AppError> {
    let xml = twiml.to_xml()?;
    log::debug!("Responding with TwiML {xml}");

    Ok(([(header::CONTENT_TYPE, "text/xml")], xml).into_response())
}
