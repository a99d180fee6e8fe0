//! HTTP session shared by the handshake tiers and the reservation attempt.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use seatwarden_core::config::HttpConfig;
use seatwarden_entity::profile::UserProfile;

use crate::error::PortalError;

const ACCEPT_VALUE: &str = "application/json, text/plain, */*";

/// Identity cookie the application expects on every call after login.
///
/// The application never sets it itself, so the session composes it from the
/// login response and attaches it to requests within its domain.
#[derive(Clone, PartialEq, Eq)]
pub struct IdentityCookie {
    name: String,
    value: String,
    domain: String,
}

impl IdentityCookie {
    /// Compose the cookie from a profile and the card number.
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
        profile: &UserProfile,
        card_no: &str,
    ) -> Self {
        Self {
            name: name.into(),
            value: format!(
                "userid={};username={};usernumber={};token={}",
                profile.acc_no, profile.logon_name, card_no, profile.token
            ),
            domain: domain.into(),
        }
    }

    /// `name=value` as sent in the `Cookie` header.
    pub fn pair(&self) -> String {
        format!("{}={}", self.name, self.value)
    }

    /// Whether the cookie is in scope for a URL.
    pub fn applies_to(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let domain = self.domain.trim_start_matches('.');

        host.eq_ignore_ascii_case(domain)
            || host
                .to_ascii_lowercase()
                .ends_with(&format!(".{}", domain.to_ascii_lowercase()))
    }
}

impl std::fmt::Debug for IdentityCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityCookie")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

/// A cookie-carrying HTTP session against the portal.
///
/// One session serves exactly one request execution and is dropped with it.
#[derive(Debug)]
pub struct PortalSession {
    client: Client,
    jar: Arc<Jar>,
    identity: Option<IdentityCookie>,
}

impl PortalSession {
    /// Open a fresh session with explicit timeouts and browser headers.
    pub fn new(http: &HttpConfig) -> Result<Self, PortalError> {
        let jar = Arc::new(Jar::default());

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        match HeaderValue::from_str(&http.accept_language) {
            Ok(language) => {
                headers.insert(ACCEPT_LANGUAGE, language);
            }
            Err(e) => {
                tracing::warn!(
                    value = %http.accept_language,
                    error = %e,
                    "Accept-Language not sent"
                );
            }
        }

        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .default_headers(headers)
            .user_agent(http.user_agent.clone())
            .timeout(Duration::from_secs(http.request_timeout_seconds))
            .connect_timeout(Duration::from_secs(http.connect_timeout_seconds))
            .build()
            .map_err(|e| PortalError::transport("client setup", e))?;

        Ok(Self {
            client,
            jar,
            identity: None,
        })
    }

    /// Attach the authenticated identity to every later in-scope request.
    ///
    /// Fails if the cookie cannot be carried in a header.
    pub fn attach_identity(mut self, identity: IdentityCookie) -> Result<Self, PortalError> {
        HeaderValue::from_str(&identity.pair()).map_err(|e| {
            PortalError::protocol(format!("identity cookie is not a valid header value: {e}"))
        })?;
        self.identity = Some(identity);
        Ok(self)
    }

    /// The attached identity, if any.
    pub fn identity(&self) -> Option<&IdentityCookie> {
        self.identity.as_ref()
    }

    /// Start a GET request.
    pub fn get(&self, url: &str) -> Result<RequestBuilder, PortalError> {
        self.request(Method::GET, url)
    }

    /// Start a POST request.
    pub fn post(&self, url: &str) -> Result<RequestBuilder, PortalError> {
        self.request(Method::POST, url)
    }

    /// Send a request, labelling transport failures with the step name.
    pub async fn send(
        &self,
        step: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, PortalError> {
        let response = request
            .send()
            .await
            .map_err(|e| PortalError::transport(step, e))?;

        tracing::debug!(step, status = response.status().as_u16(), "Portal responded");
        Ok(response)
    }

    fn request(&self, method: Method, url: &str) -> Result<RequestBuilder, PortalError> {
        let parsed = Url::parse(url).map_err(|e| PortalError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let cookie = self.cookie_header(&parsed)?;
        let mut builder = self.client.request(method, parsed);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        Ok(builder)
    }

    /// Jar cookies plus the identity cookie, or `None` to let the jar decide.
    ///
    /// The client skips its own jar once a `Cookie` header is present.
    fn cookie_header(&self, url: &Url) -> Result<Option<HeaderValue>, PortalError> {
        let Some(identity) = self.identity.as_ref().filter(|id| id.applies_to(url)) else {
            return Ok(None);
        };

        let mut header = self
            .jar
            .cookies(url)
            .and_then(|value| value.to_str().map(str::to_string).ok())
            .unwrap_or_default();
        if !header.is_empty() {
            header.push_str("; ");
        }
        header.push_str(&identity.pair());

        HeaderValue::from_str(&header)
            .map(Some)
            .map_err(|e| PortalError::protocol(format!("cookie header is not valid: {e}")))
    }
}

/// Fail unless the response status is 200.
pub fn expect_ok(step: &'static str, response: &Response) -> Result<(), PortalError> {
    let status = response.status().as_u16();
    if status != 200 {
        return Err(PortalError::Status { step, status });
    }
    Ok(())
}

/// Read a response body as JSON of the given shape.
pub async fn read_json<T: DeserializeOwned>(
    step: &'static str,
    response: Response,
) -> Result<T, PortalError> {
    let body = response
        .text()
        .await
        .map_err(|e| PortalError::transport(step, e))?;

    serde_json::from_str(&body)
        .map_err(|e| PortalError::protocol(format!("{step} returned malformed JSON: {e}")))
}
