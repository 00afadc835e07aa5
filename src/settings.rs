use crate::CONFIG;
use std::{env::var, time::Duration};

/// Fixed texts spoken by the generated TwiML.
#[derive(Debug, Clone)]
pub struct Texts {
    pub welcome: String,
    pub outbound_greeting: String,
    pub inbound_greeting: String,
}

/// Read-only service settings, built once at startup and handed to every
/// handler through an `Extension`.
#[derive(Debug, Clone)]
pub struct Settings {
    pub local_address: String,
    /// Identity used when a token request or outbound call names nobody
    pub default_identity: String,
    /// Caller id presented when dialing a named client
    pub caller_id: String,
    /// Caller id presented when dialing a phone number
    pub caller_number: String,
    /// Lifetime of issued access tokens, in seconds
    pub token_ttl: i64,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub texts: Texts,
}

impl Settings {
    /// Settings compiled in from `Config.toml`.
    pub fn from_config() -> Self {
        Self {
            local_address: CONFIG.settings.local_address.to_owned(),
            default_identity: CONFIG.settings.default_identity.to_owned(),
            caller_id: CONFIG.settings.caller_id.to_owned(),
            caller_number: CONFIG.settings.caller_number.to_owned(),
            token_ttl: CONFIG.settings.token_ttl,
            api_base_url: CONFIG.settings.api_base_url.to_owned(),
            request_timeout: Duration::from_secs(CONFIG.settings.request_timeout.max(1) as u64),
            texts: Texts {
                welcome: CONFIG.texts.welcome.to_owned(),
                outbound_greeting: CONFIG.texts.outbound_greeting.to_owned(),
                inbound_greeting: CONFIG.texts.inbound_greeting.to_owned(),
            },
        }
    }

    /// Compiled-in settings with the `CALLER_NUMBER` and `LOCAL_ADDRESS`
    /// environment overrides applied.
    pub fn load() -> Self {
        let mut settings = Self::from_config();

        if let Ok(caller_number) = var("CALLER_NUMBER") {
            if !caller_number.is_empty() {
                settings.caller_number = caller_number;
            }
        }
        if let Ok(local_address) = var("LOCAL_ADDRESS") {
            if !local_address.is_empty() {
                settings.local_address = local_address;
            }
        }

        settings
    }
}
