use super::params::Params;
use crate::{
    error::AppError,
    secrets::{MissingSecret, Secrets},
    settings::Settings,
};
use axum::Extension;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error(transparent)]
    Missing(#[from] MissingSecret),
    #[error("Error encoding token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Grants {
    identity: String,
    voice: VoiceGrant,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct VoiceGrant {
    incoming: IncomingVoiceGrant,
    #[serde(skip_serializing_if = "Option::is_none")]
    outgoing: Option<OutgoingVoiceGrant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    push_credential_sid: Option<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct IncomingVoiceGrant {
    allow: bool,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct OutgoingVoiceGrant {
    application_sid: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    jti: String,
    iss: String,
    sub: String,
    iat: i64,
    nbf: i64,
    exp: i64,
    grants: Grants,
}

pub async fn access_token_handler(
    secrets: Extension<Secrets>,
    settings: Extension<Settings>,
    params: Params,
) -> Result<String, AppError> {
    let identity = params
        .get("identity")
        .filter(|identity| !identity.is_empty())
        .unwrap_or(settings.default_identity.as_str())
        .to_owned();

    let token = issue_token(&identity, &secrets, settings.token_ttl)?;
    log::debug!("Issued access token for {identity}");

    Ok(token)
}

/// Issue a voice access token for `identity`, signed with the API secret.
pub fn issue_token(identity: &str, secrets: &Secrets, ttl: i64) -> Result<String, TokenError> {
    let account_sid = secrets.account_sid()?;
    let api_key = secrets.api_key()?;
    let api_secret = secrets.api_secret()?;

    // Set current time and expiration
    let now = Utc::now();
    let iat = now.timestamp();
    let nbf = iat;
    let exp = (now + Duration::seconds(ttl)).timestamp();

    // Build grants, unset sids are left out of the token
    let grants = Grants {
        identity: identity.to_owned(),
        voice: VoiceGrant {
            incoming: IncomingVoiceGrant { allow: true },
            outgoing: secrets
                .app_sid
                .as_ref()
                .map(|application_sid| OutgoingVoiceGrant {
                    application_sid: application_sid.to_owned(),
                }),
            push_credential_sid: secrets.push_credential_sid.clone(),
        },
    };

    let claims = Claims {
        jti: format!("{api_key}-{iat}"),
        iss: api_key.to_owned(),
        sub: account_sid.to_owned(),
        iat,
        nbf,
        exp,
        grants,
    };

    let header = Header {
        cty: Some("twilio-fpa;v=1".to_string()),
        ..Default::default()
    };

    Ok(encode(
        &header,
        &claims,
        &EncodingKey::from_secret(api_secret.as_bytes()),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

    fn secrets() -> Secrets {
        Secrets {
            account_sid: Some("AC123".to_string()),
            api_key: Some("SK456".to_string()),
            api_secret: Some("super-secret".to_string()),
            app_sid: Some("AP789".to_string()),
            push_credential_sid: Some("CR000".to_string()),
        }
    }

    fn decode_claims(token: &str) -> Claims {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        decode::<Claims>(token, &DecodingKey::from_secret(b"super-secret"), &validation)
            .unwrap()
            .claims
    }

    #[test]
    fn token_carries_identity_and_voice_grant() {
        let token = issue_token("carol", &secrets(), 3600).unwrap();
        let claims = decode_claims(&token);

        assert_eq!(claims.grants.identity, "carol");
        assert_eq!(claims.iss, "SK456");
        assert_eq!(claims.sub, "AC123");
        assert_eq!(claims.jti, format!("SK456-{}", claims.iat));
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(
            claims.grants.voice,
            VoiceGrant {
                incoming: IncomingVoiceGrant { allow: true },
                outgoing: Some(OutgoingVoiceGrant {
                    application_sid: "AP789".to_string()
                }),
                push_credential_sid: Some("CR000".to_string()),
            }
        );

        let header = decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
        assert_eq!(header.cty.as_deref(), Some("twilio-fpa;v=1"));
    }

    #[test]
    fn unset_sids_are_left_out() {
        let secrets = Secrets {
            app_sid: None,
            push_credential_sid: None,
            ..secrets()
        };
        let token = issue_token("alice", &secrets, 60).unwrap();
        let claims = decode_claims(&token);

        assert_eq!(claims.grants.voice.outgoing, None);
        assert_eq!(claims.grants.voice.push_credential_sid, None);
    }

    #[test]
    fn tokens_only_differ_in_time_dependent_claims() {
        let first = decode_claims(&issue_token("carol", &secrets(), 3600).unwrap());
        let second = decode_claims(&issue_token("carol", &secrets(), 3600).unwrap());

        assert_eq!(first.grants, second.grants);
        assert_eq!(first.iss, second.iss);
        assert_eq!(first.sub, second.sub);
    }

    #[test]
    fn missing_secret_is_an_error() {
        let secrets = Secrets {
            api_secret: None,
            ..secrets()
        };

        match issue_token("carol", &secrets, 3600) {
            Err(TokenError::Missing(MissingSecret(name))) => assert_eq!(name, "API_SECRET"),
            other => panic!("unexpected result {other:?}"),
        }
    }
}
