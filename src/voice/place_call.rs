use super::params::Params;
use crate::{
    destination::is_numeric,
    error::AppError,
    secrets::Secrets,
    settings::Settings,
    twilio::{Client as TwilioClient, OutboundCall, TwilioError},
};
use axum::{extract::Host, http::HeaderMap, Extension};
use reqwest::Client as ReqwestClient;

/// Both ends of an outbound call as the provider expects them.
#[derive(Debug, PartialEq, Eq)]
pub struct CallRoute {
    pub to: String,
    pub from: String,
}

/// Makes a call through the REST API, the callee is connected to this
/// service's `/incoming` route once it answers.
pub async fn place_call_handler(
    secrets: Extension<Secrets>,
    settings: Extension<Settings>,
    reqwest: Extension<ReqwestClient>,
    host: Option<Host>,
    headers: HeaderMap,
    params: Params,
) -> Result<String, AppError> {
    let twilio = TwilioClient::new(
        secrets.account_sid()?,
        secrets.api_key()?,
        secrets.api_secret()?,
        &settings.api_base_url,
        reqwest.0,
    );

    // The provider has to reach us on the host the caller used
    let Some(Host(host)) = host else {
        return Err(AppError::BadRequest(
            "Cannot determine the host for the callback URL".to_string(),
        ));
    };

    let route = route_call(params.get("to"), &settings);
    let callback = callback_url(&headers, &host);

    Ok(place_call(&twilio, &route, &callback).await?)
}

/// Pick the provider-side pairing for `to`. Only a plain run of digits counts
/// as a phone number here, a leading `+` makes it a client name.
pub fn route_call(to: Option<&str>, settings: &Settings) -> CallRoute {
    match to {
        None | Some("") => CallRoute {
            to: format!("client:{}", settings.default_identity),
            from: settings.caller_id.to_owned(),
        },
        Some(number) if is_numeric(number) => CallRoute {
            to: number.to_owned(),
            from: settings.caller_number.to_owned(),
        },
        Some(name) => CallRoute {
            to: format!("client:{name}"),
            from: settings.caller_id.to_owned(),
        },
    }
}

/// The `/incoming` route on `host`, using the scheme a proxy in front of us
/// reports, `http` otherwise.
pub fn callback_url(headers: &HeaderMap, host: &str) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http");

    format!("{scheme}://{host}/incoming")
}

/// Create the call and return its sid. Failures are not retried.
pub async fn place_call(
    twilio: &TwilioClient,
    route: &CallRoute,
    callback: &str,
) -> Result<String, TwilioError> {
    let call = twilio
        .make_call(OutboundCall::new(&route.from, &route.to, callback))
        .await?;

    log::info!(
        "Placed call {} from {} to {} ({:?})",
        call.sid,
        call.from,
        call.to,
        call.status
    );

    Ok(call.sid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn route(to: Option<&str>) -> CallRoute {
        route_call(to, &Settings::from_config())
    }

    #[test]
    fn no_destination_calls_the_default_identity() {
        let expected = CallRoute {
            to: "client:alice".to_string(),
            from: "client:quick_start".to_string(),
        };
        assert_eq!(route(None), expected);
        assert_eq!(route(Some("")), expected);
    }

    #[test]
    fn digits_are_called_from_the_caller_number() {
        assert_eq!(
            route(Some("15551234567")),
            CallRoute {
                to: "15551234567".to_string(),
                from: "1234567890".to_string(),
            }
        );
    }

    #[test]
    fn names_and_plus_prefixed_numbers_are_clients() {
        assert_eq!(
            route(Some("bob")),
            CallRoute {
                to: "client:bob".to_string(),
                from: "client:quick_start".to_string(),
            }
        );
        assert_eq!(
            route(Some("+15551234567")),
            CallRoute {
                to: "client:+15551234567".to_string(),
                from: "client:quick_start".to_string(),
            }
        );
    }

    #[test]
    fn callback_uses_the_forwarded_scheme() {
        let mut headers = HeaderMap::new();
        assert_eq!(
            callback_url(&headers, "example.ngrok.io"),
            "http://example.ngrok.io/incoming"
        );

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(
            callback_url(&headers, "example.ngrok.io"),
            "https://example.ngrok.io/incoming"
        );
    }
}
