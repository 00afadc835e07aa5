use super::{Client, TwilioError};
use reqwest::Method;
use serde::Deserialize;

pub struct OutboundCall<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub url: &'a str,
}

impl<'a> OutboundCall<'a> {
    pub fn new(from: &'a str, to: &'a str, url: &'a str) -> OutboundCall<'a> {
        OutboundCall { from, to, url }
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    Queued,
    Initiated,
    Ringing,
    InProgress,
    Canceled,
    Completed,
    Failed,
    Busy,
    NoAnswer,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
pub struct Call {
    pub sid: String,
    pub from: String,
    pub to: String,
    pub status: CallStatus,
}

impl Client {
    /// Create a call. The provider fetches `call.url` with a GET once the
    /// callee answers.
    pub async fn make_call(&self, call: OutboundCall<'_>) -> Result<Call, TwilioError> {
        let opts = [
            ("To", call.to),
            ("From", call.from),
            ("Url", call.url),
            ("Method", "GET"),
        ];
        self.send_request(Method::POST, "Calls", &opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client as ReqwestClient;
    use serde_json::json;
    use wiremock::matchers::{basic_auth, body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> Client {
        Client::new("AC123", "SK456", "secret", &server.uri(), ReqwestClient::new())
    }

    #[tokio::test]
    async fn make_call_posts_the_call_resource() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
            .and(basic_auth("SK456", "secret"))
            .and(body_string_contains("To=client%3Abob"))
            .and(body_string_contains("From=client%3Aquick_start"))
            .and(body_string_contains("Method=GET"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "sid": "CA0001",
                "from": "client:quick_start",
                "to": "client:bob",
                "status": "queued",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let call = client(&server)
            .make_call(OutboundCall::new(
                "client:quick_start",
                "client:bob",
                "http://host/incoming",
            ))
            .await
            .unwrap();

        assert_eq!(call.sid, "CA0001");
        assert_eq!(call.status, CallStatus::Queued);
    }

    #[tokio::test]
    async fn error_status_is_reported_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Authenticate"))
            .mount(&server)
            .await;

        let err = client(&server)
            .make_call(OutboundCall::new(
                "1234567890",
                "15551234567",
                "http://host/incoming",
            ))
            .await
            .unwrap_err();

        match err {
            TwilioError::Http { status, body } => {
                assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
                assert_eq!(body, "Authenticate");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_body_is_a_parsing_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server)
            .make_call(OutboundCall::new(
                "1234567890",
                "15551234567",
                "http://host/incoming",
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, TwilioError::Parsing));
    }
}
