use std::env::var;
use thiserror::Error;

/// Returned when a credential is needed but was never configured.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0} must be set")]
pub struct MissingSecret(pub &'static str);

/// Provider credentials. Every value is optional at startup, a missing one
/// only fails the request that needs it.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub account_sid: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub app_sid: Option<String>,
    pub push_credential_sid: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Self {
        let secrets = Self {
            account_sid: optional("ACCOUNT_SID"),
            api_key: optional("API_KEY"),
            api_secret: optional("API_SECRET"),
            app_sid: optional("APP_SID").or_else(|| optional("OUTGOING_APP_SID")),
            push_credential_sid: optional("PUSH_CREDENTIAL_SID"),
        };

        for (name, value) in [
            ("ACCOUNT_SID", &secrets.account_sid),
            ("API_KEY", &secrets.api_key),
            ("API_SECRET", &secrets.api_secret),
        ] {
            if value.is_none() {
                log::warn!("{name} is not set, tokens and outbound calls will fail");
            }
        }

        secrets
    }

    pub fn account_sid(&self) -> Result<&str, MissingSecret> {
        required(&self.account_sid, "ACCOUNT_SID")
    }

    pub fn api_key(&self) -> Result<&str, MissingSecret> {
        required(&self.api_key, "API_KEY")
    }

    pub fn api_secret(&self) -> Result<&str, MissingSecret> {
        required(&self.api_secret, "API_SECRET")
    }
}

fn optional(name: &str) -> Option<String> {
    var(name).ok().filter(|value| !value.is_empty())
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, MissingSecret> {
    value.as_deref().ok_or(MissingSecret(name))
}
