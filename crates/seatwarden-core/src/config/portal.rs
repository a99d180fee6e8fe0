//! Upstream portal configuration.
//!
//! The portal sits behind a gateway tunnel. Every application URL is
//! rewritten by the tunnel, so both tiers are configured with the full
//! tunnelled base URLs rather than the portal's own host names.

use serde::{Deserialize, Serialize};

/// Upstream portal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Gateway tunnel (tier 1) settings.
    pub gateway: GatewayConfig,
    /// Application (tier 2) settings.
    pub application: ApplicationConfig,
    /// Transport settings shared by both tiers.
    #[serde(default)]
    pub http: HttpConfig,
}

/// Gateway tunnel login settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// URL of the gateway login form.
    pub login_url: String,
    /// Value of the `service` query parameter sent with the login form.
    pub service_url: String,
    /// Path fragment the final redirect must contain after a good login.
    #[serde(default = "default_success_fragment")]
    pub success_fragment: String,
    /// Shared gateway account name.
    pub username: String,
    /// Shared gateway account password.
    pub password: String,
}

/// Application login and reservation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Tunnelled base URL of the application, ending with `/`.
    pub base_url: String,
    /// Raw query string the tunnel uses to route application calls.
    #[serde(default)]
    pub route_suffix: Option<String>,
    /// Name of the identity cookie the application expects.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Domain the identity cookie is scoped to.
    pub cookie_domain: String,
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Accept-Language header sent with every request.
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: default_request_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

fn default_success_fragment() -> String {
    "frontend/login/index.html".to_string()
}

fn default_cookie_name() -> String {
    "ic-cookie".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_accept_language() -> String {
    "zh-CN,zh;q=0.9".to_string()
}
