//! Tier 2: application login.

use serde_json::Value;

use seatwarden_core::config::ApplicationConfig;
use seatwarden_entity::profile::UserProfile;
use seatwarden_entity::profile::model::field_text;
use seatwarden_entity::reservation::Credentials;

use crate::context::SessionContext;
use crate::crypto::encrypt_application_password;
use crate::error::PortalError;
use crate::session::{IdentityCookie, PortalSession, expect_ok, read_json};
use crate::wire::{self, Envelope, LoginBody, PublicKeyData};

/// Field carrying the card number in the login payload.
const CARD_NUMBER_FIELD: &str = "cardNo";

/// Log a gateway-authenticated session into the application.
///
/// Consumes the session and hands it back inside the context, with the
/// identity cookie attached. Nothing partial is returned on failure.
pub async fn login(
    session: PortalSession,
    config: &ApplicationConfig,
    credentials: &Credentials,
) -> Result<SessionContext, PortalError> {
    let landing = session
        .send("application landing page", session.get(&wire::endpoint(config, wire::LANDING_PATH))?)
        .await?;
    expect_ok("application landing page", &landing)?;

    let key_response = session
        .send("public key", session.get(&wire::endpoint(config, wire::PUBLIC_KEY_PATH))?)
        .await?;
    expect_ok("public key", &key_response)?;
    let key: Envelope<PublicKeyData> = read_json("public key", key_response).await?;
    if !key.is_success() {
        return Err(rejection(&key, "public key request refused"));
    }
    let key = key
        .data
        .ok_or_else(|| PortalError::protocol("public key response has no data"))?;

    let encrypted =
        encrypt_application_password(&key.public_key, &credentials.password, &key.nonce_str)?;

    let body = LoginBody {
        logon_name: &credentials.logon_name,
        password: &encrypted,
        captcha: "",
        privacy: true,
    };
    let login_response = session
        .send(
            "application login",
            session.post(&wire::endpoint(config, wire::LOGIN_PATH))?.json(&body),
        )
        .await?;
    expect_ok("application login", &login_response)?;
    let login: Envelope<Value> = read_json("application login", login_response).await?;
    if !login.is_success() {
        return Err(rejection(&login, "application login refused"));
    }

    let data = login
        .data
        .ok_or_else(|| PortalError::protocol("login response has no data"))?;
    let profile = UserProfile::from_portal_json(&data)
        .map_err(|e| PortalError::protocol(e.to_string()))?;
    let card_no = card_number(&data)?;

    let identity = IdentityCookie::new(
        config.cookie_name.clone(),
        config.cookie_domain.clone(),
        &profile,
        &card_no,
    );

    tracing::debug!(pid = %profile.pid, "Application login succeeded");
    Ok(SessionContext::new(session.attach_identity(identity)?, profile))
}

fn card_number(data: &Value) -> Result<String, PortalError> {
    let object = data
        .as_object()
        .ok_or_else(|| PortalError::protocol("login data is not an object"))?;
    if !object.contains_key(CARD_NUMBER_FIELD) {
        return Err(PortalError::protocol("login data has no cardNo"));
    }
    field_text(object, CARD_NUMBER_FIELD).map_err(|e| PortalError::protocol(e.to_string()))
}

fn rejection<T>(envelope: &Envelope<T>, fallback: &str) -> PortalError {
    let message = envelope
        .message
        .clone()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("{fallback} (code {})", envelope.code));
    PortalError::Rejected(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_card_number_accepts_numbers_and_strings() {
        assert_eq!(card_number(&json!({"cardNo": 990012})).unwrap(), "990012");
        assert_eq!(card_number(&json!({"cardNo": "C0099"})).unwrap(), "C0099");
    }

    #[test]
    fn test_missing_card_number_is_a_protocol_error() {
        assert!(matches!(
            card_number(&json!({"accNo": 1})),
            Err(PortalError::Protocol(_))
        ));
    }

    #[test]
    fn test_rejection_prefers_server_message() {
        let envelope: Envelope<Value> =
            serde_json::from_value(json!({"code": 300, "message": "wrong password"})).unwrap();
        assert_eq!(
            rejection(&envelope, "application login refused").to_string(),
            "rejected by portal: wrong password"
        );

        let silent: Envelope<Value> = serde_json::from_value(json!({"code": 300})).unwrap();
        assert_eq!(
            rejection(&silent, "application login refused").to_string(),
            "rejected by portal: application login refused (code 300)"
        );
    }
}
