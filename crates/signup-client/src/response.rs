//! The registration endpoint's reply.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use signup_forms::schema::{CORREO, TELEFONO, USERNAME};

/// Body returned by the registration endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterResponse {
    /// Whether the server accepted the registration.
    ///
    /// Read by truthiness: `null`, `0`, `""` or a missing flag count as
    /// failure, so the reply still reaches the conflict table.
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    /// Error text. Values other than strings are kept as their JSON text.
    #[serde(default, deserialize_with = "loose_string")]
    pub error: Option<String>,
    /// Machine-readable conflict code, when the server provides one.
    #[serde(default, deserialize_with = "loose_string")]
    pub code: Option<String>,
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

impl RegisterResponse {
    /// The field conflict this reply reports, if any.
    ///
    /// A `code` takes precedence over the wording of `error`.
    pub fn conflict(&self) -> Option<ServerConflict> {
        if self.success {
            return None;
        }
        self.code
            .as_deref()
            .and_then(ServerConflict::from_code)
            .or_else(|| self.error.as_deref().and_then(ServerConflict::from_message))
    }
}

/// A server-side rejection tied to one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerConflict {
    /// The username is already registered.
    UsernameTaken,
    /// The e-mail address is already registered.
    EmailInUse,
    /// The phone number is already registered.
    PhoneRegistered,
}

impl ServerConflict {
    /// Maps the server's error text onto a conflict.
    ///
    /// Matching is exact: any other wording is not a field conflict.
    pub fn from_message(message: &str) -> Option<Self> {
        match message {
            "Username already exists" => Some(Self::UsernameTaken),
            "E-mail already in use" => Some(Self::EmailInUse),
            "That phone number is already registered" => Some(Self::PhoneRegistered),
            _ => None,
        }
    }

    /// Maps a structured conflict code onto a conflict.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "username_taken" => Some(Self::UsernameTaken),
            "email_in_use" => Some(Self::EmailInUse),
            "phone_registered" => Some(Self::PhoneRegistered),
            _ => None,
        }
    }

    /// The form field the conflict is shown under.
    pub const fn field(self) -> &'static str {
        match self {
            Self::UsernameTaken => USERNAME,
            Self::EmailInUse => CORREO,
            Self::PhoneRegistered => TELEFONO,
        }
    }

    /// The server's wording for this conflict.
    pub const fn message(self) -> &'static str {
        match self {
            Self::UsernameTaken => "Username already exists",
            Self::EmailInUse => "E-mail already in use",
            Self::PhoneRegistered => "That phone number is already registered",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> RegisterResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_parse_success() {
        let response = parse(r#"{"success": true}"#);
        assert!(response.success);
        assert_eq!(response.error, None);
        assert_eq!(response.conflict(), None);
    }

    #[test]
    fn test_missing_success_is_failure() {
        let response = parse(r#"{"error": "boom"}"#);
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_success_follows_truthiness() {
        for body in [
            r#"{"success": null}"#,
            r#"{"success": 0}"#,
            r#"{"success": ""}"#,
            r#"{"success": false}"#,
        ] {
            assert!(!parse(body).success, "{body} should be a failure");
        }
        for body in [
            r#"{"success": 1}"#,
            r#"{"success": "yes"}"#,
            r#"{"success": {}}"#,
            r#"{"success": true}"#,
        ] {
            assert!(parse(body).success, "{body} should be a success");
        }
    }

    #[test]
    fn test_falsy_success_still_reports_conflict() {
        let response = parse(r#"{"success": 0, "error": "E-mail already in use"}"#);
        assert_eq!(response.conflict(), Some(ServerConflict::EmailInUse));
    }

    #[test]
    fn test_non_string_error_is_kept_as_text() {
        let response = parse(r#"{"success": false, "error": 42}"#);
        assert_eq!(response.error.as_deref(), Some("42"));
        assert_eq!(response.conflict(), None);

        let response = parse(r#"{"success": false, "error": null}"#);
        assert_eq!(response.error, None);
    }

    #[test]
    fn test_known_messages_map_to_fields() {
        let cases = [
            ("Username already exists", "username"),
            ("E-mail already in use", "correo"),
            ("That phone number is already registered", "telefono"),
        ];
        for (message, field) in cases {
            let conflict = ServerConflict::from_message(message).unwrap();
            assert_eq!(conflict.field(), field);
            assert_eq!(conflict.message(), message);
        }
    }

    #[test]
    fn test_message_match_is_exact() {
        assert_eq!(ServerConflict::from_message("username already exists"), None);
        assert_eq!(ServerConflict::from_message("Username already exists."), None);
        assert_eq!(ServerConflict::from_message("Something else"), None);
    }

    #[test]
    fn test_code_takes_precedence() {
        let response = parse(
            r#"{"success": false, "error": "Username already exists", "code": "email_in_use"}"#,
        );
        assert_eq!(response.conflict(), Some(ServerConflict::EmailInUse));

        let response = parse(r#"{"success": false, "code": "phone_registered"}"#);
        assert_eq!(response.conflict(), Some(ServerConflict::PhoneRegistered));
    }

    #[test]
    fn test_unknown_code_falls_back_to_message() {
        let response = parse(
            r#"{"success": false, "error": "E-mail already in use", "code": "dup"}"#,
        );
        assert_eq!(response.conflict(), Some(ServerConflict::EmailInUse));
    }
}
