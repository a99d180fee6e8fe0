//! JSON shapes and endpoint paths of the application tier.

use serde::{Deserialize, Serialize};

use seatwarden_core::config::ApplicationConfig;
use seatwarden_core::types::DeviceId;

/// Landing page that seeds the application session cookies.
pub const LANDING_PATH: &str = "ic-web/default/index";
/// One-time public key and nonce.
pub const PUBLIC_KEY_PATH: &str = "ic-web/login/publicKey";
/// Application login.
pub const LOGIN_PATH: &str = "ic-web/login/user";
/// Reservation creation.
pub const RESERVE_PATH: &str = "ic-web/reserve";

/// Application code meaning success.
pub const SUCCESS_CODE: i64 = 0;

/// Build an application URL, appending the tunnel routing suffix if configured.
pub fn endpoint(config: &ApplicationConfig, path: &str) -> String {
    match config.route_suffix.as_deref() {
        Some(suffix) if !suffix.is_empty() => format!("{}{}?{}", config.base_url, path, suffix),
        _ => format!("{}{}", config.base_url, path),
    }
}

/// Common response wrapper of the application.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// Application result code.
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload, present on success.
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Whether the application reported success.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Payload of the public key endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyData {
    /// Base64 DER public key.
    pub public_key: String,
    /// Single-use nonce appended to the password.
    pub nonce_str: String,
}

/// Body of the application login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody<'a> {
    pub logon_name: &'a str,
    pub password: &'a str,
    pub captcha: &'a str,
    pub privacy: bool,
}

/// Body of a reservation creation call for one seat.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveBody<'a> {
    pub test_name: &'a str,
    pub app_acc_no: &'a str,
    pub member_kind: u8,
    pub resv_dev: [&'a DeviceId; 1],
    pub resv_member: [&'a str; 1],
    pub resv_property: u8,
    pub sys_kind: u8,
    pub resv_begin_time: String,
    pub resv_end_time: String,
}

/// Payload of a successful reservation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveData {
    #[serde(default)]
    pub resv_name: String,
    #[serde(default)]
    pub resv_dev_info_list: Vec<ReservedDevice>,
}

/// Seat entry of a successful reservation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservedDevice {
    #[serde(default)]
    pub room_name: String,
    #[serde(default)]
    pub dev_name: String,
}
