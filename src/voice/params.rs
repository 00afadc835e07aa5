use crate::error::AppError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, Method},
};
use std::collections::BTreeMap;
use url::form_urlencoded;

/// Request parameters, read from the query string of a GET and from the
/// urlencoded body of a POST. A repeated key keeps its first value.
#[derive(Debug, Default)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Query strings are percent-decoded only, a literal `+` stays a `+`.
    pub fn from_query(query: &str) -> Params {
        Params::from_form(query.replace('+', "%2B").as_bytes())
    }

    pub fn from_form(encoded: &[u8]) -> Params {
        let mut params = BTreeMap::new();
        for (key, value) in form_urlencoded::parse(encoded).into_owned() {
            params.entry(key).or_insert(value);
        }
        Params(params)
    }
}

#[async_trait]
impl<S> FromRequest<S> for Params
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = request.uri().query().unwrap_or_default().to_owned();
        if request.method() == Method::GET || request.method() == Method::HEAD {
            return Ok(Params::from_query(&query));
        }

        let is_form = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let body = Bytes::from_request(request, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        // A POST without a body may still carry its parameters in the query
        if body.is_empty() {
            return Ok(Params::from_query(&query));
        }
        if !is_form {
            return Err(AppError::BadRequest(
                "Expected an application/x-www-form-urlencoded body".to_string(),
            ));
        }

        Ok(Params::from_form(&body))
    }
}
