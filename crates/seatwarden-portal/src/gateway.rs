//! Tier 1: gateway tunnel login.

use seatwarden_core::config::GatewayConfig;

use crate::crypto::encrypt_gateway_password;
use crate::error::PortalError;
use crate::form::GatewayForm;
use crate::session::{PortalSession, expect_ok};

/// Log the session into the gateway tunnel.
///
/// On success the tunnel cookies sit in the session jar. Success is judged
/// only by where the redirect chain ends.
pub async fn login(session: &PortalSession, config: &GatewayConfig) -> Result<(), PortalError> {
    let service = [("service", config.service_url.as_str())];

    let page = session
        .send("gateway login page", session.get(&config.login_url)?.query(&service))
        .await?;
    expect_ok("gateway login page", &page)?;
    let html = page
        .text()
        .await
        .map_err(|e| PortalError::transport("gateway login page", e))?;

    let form = GatewayForm::parse(&html)?;
    let encrypted = encrypt_gateway_password(&form.salt, &config.password)?;

    let response = session
        .send(
            "gateway login",
            session
                .post(&config.login_url)?
                .query(&service)
                .form(&form.login_fields(&config.username, &encrypted)),
        )
        .await?;
    expect_ok("gateway login", &response)?;

    let landed = response.url();
    if !landed.as_str().contains(&config.success_fragment) {
        return Err(PortalError::Rejected(format!(
            "gateway login ended at {}{} instead of the post-login page",
            landed.host_str().unwrap_or_default(),
            landed.path()
        )));
    }

    tracing::debug!("Gateway login succeeded");
    Ok(())
}
