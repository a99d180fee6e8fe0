//! Shared fixtures: a mock portal served by mockito.

#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use mockito::{Matcher, Mock, Server, ServerGuard};
use rsa::RsaPrivateKey;
use rsa::pkcs8::EncodePublicKey;
use serde_json::{Value, json};

use seatwarden_core::config::{ApplicationConfig, GatewayConfig, HttpConfig, PortalConfig};
use seatwarden_entity::reservation::{Credentials, ResolvedWindow, TimeWindow};

pub const SALT: &str = "ybb3MxGnaVEBf5Fk";
pub const TICKET: &str = "LT-2291-abc";
pub const ROUTE_SUFFIX: &str = "vpn-12-libseat.example.edu";
pub const TOKEN: &str = "tok-abc";

/// A mock portal plus the configuration pointing at it.
pub struct TestPortal {
    pub server: ServerGuard,
    pub config: PortalConfig,
    pub private_key: RsaPrivateKey,
}

impl TestPortal {
    /// Start an empty mock portal.
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let url = server.url();

        let config = PortalConfig {
            gateway: GatewayConfig {
                login_url: format!("{url}/authserver/login"),
                service_url: "https://gw.example.edu/rump_frontend/loginFromCas/".to_string(),
                success_fragment: "frontend/login/index.html".to_string(),
                username: "gate".to_string(),
                password: "gate-pass".to_string(),
            },
            application: ApplicationConfig {
                base_url: format!("{url}/app/"),
                route_suffix: Some(ROUTE_SUFFIX.to_string()),
                cookie_name: "ic-cookie".to_string(),
                cookie_domain: "127.0.0.1".to_string(),
            },
            http: HttpConfig {
                request_timeout_seconds: 5,
                connect_timeout_seconds: 5,
                ..HttpConfig::default()
            },
        };

        let private_key =
            RsaPrivateKey::new(&mut rand::thread_rng(), 1024).expect("generate RSA key");

        Self {
            server,
            config,
            private_key,
        }
    }

    /// Base64 DER of the public half of the test key.
    pub fn public_key(&self) -> String {
        let der = self
            .private_key
            .to_public_key()
            .to_public_key_der()
            .expect("encode public key");
        STANDARD.encode(der.as_bytes())
    }

    /// Gateway page, submit and the post-login landing page.
    pub async fn mock_gateway(&mut self) -> Vec<Mock> {
        let landing = format!("{}/frontend/login/index.html", self.server.url());
        self.mock_gateway_redirecting_to(&landing).await
    }

    /// Gateway page and a submit that redirects to `location`.
    pub async fn mock_gateway_redirecting_to(&mut self, location: &str) -> Vec<Mock> {
        let page = self
            .server
            .mock("GET", "/authserver/login")
            .match_query(Matcher::UrlEncoded(
                "service".into(),
                "https://gw.example.edu/rump_frontend/loginFromCas/".into(),
            ))
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(login_page())
            .expect(1)
            .create_async()
            .await;

        let submit = self
            .server
            .mock("POST", "/authserver/login")
            .match_query(Matcher::Any)
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("username".into(), "gate".into()),
                Matcher::UrlEncoded("lt".into(), TICKET.into()),
                Matcher::UrlEncoded("dllt".into(), "userNamePasswordLogin".into()),
                Matcher::UrlEncoded("execution".into(), "e1s1".into()),
            ]))
            .with_status(302)
            .with_header("location", location)
            .expect(1)
            .create_async()
            .await;

        let landing = self
            .server
            .mock("GET", "/frontend/login/index.html")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>welcome</html>")
            .create_async()
            .await;

        vec![page, submit, landing]
    }

    /// Landing page, public key and a login answering with `login_body`.
    pub async fn mock_application(&mut self, login_body: Value, expected_calls: usize) -> Vec<Mock> {
        let landing = self
            .server
            .mock("GET", "/app/ic-web/default/index")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("set-cookie", "JSESSIONID=abc123; Path=/")
            .with_body("<html></html>")
            .expect(expected_calls)
            .create_async()
            .await;

        let key = self
            .server
            .mock("GET", "/app/ic-web/login/publicKey")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "code": 0,
                    "message": "",
                    "data": {"publicKey": self.public_key(), "nonceStr": "n0nce"}
                })
                .to_string(),
            )
            .expect(expected_calls)
            .create_async()
            .await;

        let login = self
            .server
            .mock("POST", "/app/ic-web/login/user")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(json!({
                "logonName": "2210104201",
                "captcha": "",
                "privacy": true
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(login_body.to_string())
            .expect(expected_calls)
            .create_async()
            .await;

        vec![landing, key, login]
    }

    /// A reservation answer for one seat id.
    pub async fn mock_reserve(&mut self, device_id: &str, status: usize, body: Value) -> Mock {
        self.server
            .mock("POST", "/app/ic-web/reserve")
            .match_query(Matcher::Any)
            .match_header("token", TOKEN)
            .match_body(Matcher::PartialJson(json!({ "resvDev": [device_id] })))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(1)
            .create_async()
            .await
    }
}

/// Gateway login page carrying the salt and ticket.
pub fn login_page() -> String {
    format!(
        r#"<html><body><form id="casLoginForm">
            <input type="hidden" name="lt" value="{TICKET}" />
            <input type="hidden" id="pwdDefaultEncryptSalt" value="{SALT}" />
        </form></body></html>"#
    )
}

/// A complete application login answer.
pub fn login_success() -> Value {
    json!({
        "code": 0,
        "message": "",
        "data": {
            "uuid": "f1e2d3",
            "accNo": 100234,
            "pid": "2210104201",
            "logonName": "2210104201",
            "trueName": "Li Hua",
            "className": "CS-22-1",
            "sex": 1,
            "deptName": "Computer Science",
            "token": TOKEN,
            "cardNo": "C0099"
        }
    })
}

/// A reservation success answer.
pub fn reserve_success(dev_name: &str) -> Value {
    json!({
        "code": 0,
        "message": "ok",
        "data": {
            "resvName": "Li Hua",
            "resvDevInfoList": [{"roomName": "Reading Room 3", "devName": dev_name}]
        }
    })
}

/// A reservation refusal with a server message.
pub fn reserve_rejected(message: &str) -> Value {
    json!({"code": 1, "message": message, "data": null})
}

/// Application credentials of the test account.
pub fn credentials() -> Credentials {
    Credentials::new("2210104201", "hunter2")
}

/// 10:30-22:00 on 2025-03-02.
pub fn window() -> ResolvedWindow {
    TimeWindow::parse("10:30", "22:00")
        .and_then(|w| w.resolve_after(NaiveDate::from_ymd_opt(2025, 3, 1).expect("date")))
        .expect("window")
}
