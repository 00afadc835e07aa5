use super::{incoming::generate_greeting_twiml, params::Params, respond_with};
use crate::{
    destination::{classify, Destination},
    error::AppError,
    settings::Settings,
    twilio::twiml::{Dial, DialTarget, Twiml},
};
use axum::{response::Response, Extension};

/// Voice request URL of the TwiML app, consulted when a client places an
/// outgoing call.
pub async fn make_call_handler(
    settings: Extension<Settings>,
    params: Params,
) -> Result<Response, AppError> {
    let destination = classify(params.get("to"));
    log::debug!("Connecting outgoing call to {destination:?}");

    respond_with(build_call_control(&destination, &settings))
}

/// Generate the TwiML for an outgoing call leg.
/// - No destination: greet the caller and hang up
/// - Phone number: dial it, presenting the configured caller number
/// - Anything else: dial the named client, presenting the client caller id
pub fn build_call_control(destination: &Destination, settings: &Settings) -> Twiml {
    let (caller_id, target) = match destination {
        Destination::Empty => return generate_greeting_twiml(&settings.texts.outbound_greeting),
        Destination::PhoneNumber(number) => (
            settings.caller_number.to_owned(),
            DialTarget::Number(number.to_owned()),
        ),
        Destination::ClientName(name) => (
            settings.caller_id.to_owned(),
            DialTarget::Client(name.to_owned()),
        ),
    };

    let mut twiml = Twiml::new();

    twiml.add(Dial { caller_id, target });

    twiml
}
