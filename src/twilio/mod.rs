mod call;
pub mod twiml;

pub use call::OutboundCall;
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use thiserror::Error;

/// REST client for the voice API, authenticated with an API key pair
/// on behalf of an account.
#[derive(Clone)]
pub struct Client {
    account_sid: String,
    api_key: String,
    api_secret: String,
    base_url: String,
    client: ReqwestClient,
}

#[derive(Debug, Error)]
pub enum TwilioError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error("Invalid HTTP status code: {status}")]
    Http { status: StatusCode, body: String },
    #[error("Parsing error")]
    Parsing,
}

impl Client {
    /// `base_url` is the API origin, e.g. `https://api.twilio.com`.
    pub fn new(
        account_sid: &str,
        api_key: &str,
        api_secret: &str,
        base_url: &str,
        client: ReqwestClient,
    ) -> Client {
        Client {
            account_sid: account_sid.to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn send_request<T>(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, TwilioError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = &format!(
            "{}/2010-04-01/Accounts/{}/{}.json",
            self.base_url, self.account_sid, endpoint
        );

        let response = self
            .client
            .request(method, url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .form(&params)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {}
            status => {
                let body = response.text().await.unwrap_or_default();
                log::error!("Twilio responded with {status}: {body}");

                return Err(TwilioError::Http { status, body });
            }
        };

        response.json::<T>().await.map_err(|e| {
            log::error!("Failed to parse Twilio response: {e}");
            TwilioError::Parsing
        })
    }
}
