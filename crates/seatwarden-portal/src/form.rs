//! Gateway login form scraping.

use scraper::{Html, Selector};

use crate::error::PortalError;

const SALT_SELECTOR: &str = "input#pwdDefaultEncryptSalt";
const TICKET_SELECTOR: &str = "input[name=lt]";

/// Per-session values embedded in the gateway login page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayForm {
    /// AES key material for the password.
    pub salt: String,
    /// One-time login ticket.
    pub ticket: String,
}

impl GatewayForm {
    /// Extract the salt and ticket from the login page HTML.
    pub fn parse(html: &str) -> Result<Self, PortalError> {
        let document = Html::parse_document(html);

        Ok(Self {
            salt: input_value(&document, SALT_SELECTOR)?,
            ticket: input_value(&document, TICKET_SELECTOR)?,
        })
    }

    /// Form fields submitted to the gateway.
    pub fn login_fields<'a>(
        &'a self,
        username: &'a str,
        encrypted_password: &'a str,
    ) -> [(&'static str, &'a str); 7] {
        [
            ("username", username),
            ("password", encrypted_password),
            ("lt", &self.ticket),
            ("dllt", "userNamePasswordLogin"),
            ("execution", "e1s1"),
            ("_eventId", "submit"),
            ("rmShown", "1"),
        ]
    }
}

fn input_value(document: &Html, selector: &str) -> Result<String, PortalError> {
    let parsed = Selector::parse(selector)
        .map_err(|e| PortalError::protocol(format!("bad selector {selector}: {e}")))?;

    document
        .select(&parsed)
        .next()
        .and_then(|element| element.value().attr("value"))
        .map(str::to_string)
        .ok_or_else(|| PortalError::protocol(format!("login page has no {selector} value")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <form id="casLoginForm" method="post">
            <input type="text" name="username" />
            <input type="password" name="password" />
            <input type="hidden" name="lt" value="LT-2291-abc" />
            <input type="hidden" id="pwdDefaultEncryptSalt" value="ybb3MxGnaVEBf5Fk" />
          </form>
        </body></html>
    "#;

    #[test]
    fn test_parse_extracts_salt_and_ticket() {
        let form = GatewayForm::parse(PAGE).expect("form");
        assert_eq!(form.salt, "ybb3MxGnaVEBf5Fk");
        assert_eq!(form.ticket, "LT-2291-abc");
    }

    #[test]
    fn test_missing_salt_is_a_protocol_error() {
        let page = r#"<input type="hidden" name="lt" value="LT-1" />"#;
        let err = GatewayForm::parse(page).unwrap_err();

        assert!(matches!(err, PortalError::Protocol(message) if message.contains("pwdDefaultEncryptSalt")));
    }

    #[test]
    fn test_login_fields_carry_fixed_flags() {
        let form = GatewayForm::parse(PAGE).unwrap();
        let fields = form.login_fields("gate", "c2VhbGVk");

        assert_eq!(fields[0], ("username", "gate"));
        assert_eq!(fields[2], ("lt", "LT-2291-abc"));
        assert!(fields.contains(&("dllt", "userNamePasswordLogin")));
        assert!(fields.contains(&("execution", "e1s1")));
    }
}
