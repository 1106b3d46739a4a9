//! The registration schema: field constraints and input coercion.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::error::ValidationErrors;
use crate::fields::{email_field, min_length_field, number_field, password_field};
use crate::form::{validate_fields, FormFieldDef, Schema};

/// Username field name, as sent on the wire.
pub const USERNAME: &str = "username";
/// Password field name.
pub const PASS: &str = "pass";
/// E-mail field name.
pub const CORREO: &str = "correo";
/// Weight field name.
pub const PESO: &str = "peso";
/// Phone number field name.
pub const TELEFONO: &str = "telefono";

/// Shown when the username is shorter than two characters.
pub const USERNAME_TOO_SHORT: &str = "Username must be at least 2 characters.";
/// Shown when the password is shorter than eight characters.
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters.";
/// Shown when the e-mail address is malformed.
pub const INVALID_EMAIL: &str = "Invalid email address";

/// Largest integer an f64 represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A numeric input after coercion.
///
/// An empty input stays empty; anything else becomes a number, possibly NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    /// The input was the empty string.
    Empty,
    /// The input converted to a number.
    Number(f64),
}

impl Coerced {
    /// Coerces raw input text.
    pub fn from_input(text: &str) -> Self {
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Number(coerce_number(text))
        }
    }

    /// Returns the number, if the input was not empty.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Empty => None,
            Self::Number(n) => Some(*n),
        }
    }

    /// Whether the input was the empty string.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl Serialize for Coerced {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Empty => serializer.serialize_str(""),
            Self::Number(n) if !n.is_finite() => serializer.serialize_none(),
            // Integral values go out as JSON integers: 5551234567, not 5551234567.0.
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(n),
        }
    }
}

fn is_js_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Converts text to a number the way a browser's `Number(text)` does.
///
/// Surrounding whitespace is ignored and blank text is zero. Decimal literals,
/// `0x`/`0o`/`0b` integers and `Infinity` are accepted; anything else is NaN.
pub fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(n) = parse_radix_literal(trimmed) {
        return n;
    }

    if is_decimal_literal(trimmed) {
        trimmed.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc.mul_add(f64::from(radix), f64::from(d)))
    });
    Some(value.unwrap_or(f64::NAN))
}

/// Matches `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`.
fn is_decimal_literal(text: &str) -> bool {
    let text = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
        None => (text, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let mantissa_ok = all_digits(int_part)
        && all_digits(frac_part)
        && !(int_part.is_empty() && frac_part.is_empty());

    let exponent_ok = exponent.is_none_or(|exp| {
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        !exp.is_empty() && all_digits(exp)
    });

    mantissa_ok && exponent_ok
}

/// The validated contents of the registration form.
#[derive(Clone, PartialEq, Serialize)]
pub struct RegistrationInput {
    /// Public display name.
    pub username: String,
    /// Password, sent as typed.
    pub pass: String,
    /// E-mail address.
    pub correo: String,
    /// Weight.
    pub peso: Coerced,
    /// Phone number.
    pub telefono: Coerced,
}

impl std::fmt::Debug for RegistrationInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("username", &self.username)
            .field("pass", &"********")
            .field("correo", &self.correo)
            .field("peso", &self.peso)
            .field("telefono", &self.telefono)
            .finish()
    }
}

impl Schema for RegistrationInput {
    fn fields() -> Vec<FormFieldDef> {
        vec![
            min_length_field(USERNAME, "Username", 2, USERNAME_TOO_SHORT)
                .help_text("This is your public display name."),
            password_field(PASS, "Password", 8, PASSWORD_TOO_SHORT)
                .help_text("Enter a secure password"),
            email_field(CORREO, "E-mail", INVALID_EMAIL).help_text("Enter your e-mail"),
            number_field(PESO, "Weight", "70.4").help_text("Enter your weight for tracking"),
            number_field(TELEFONO, "Phone number", "555555555")
                .help_text("Enter your phone number"),
        ]
    }

    fn parse(data: &HashMap<String, String>) -> Result<Self, ValidationErrors> {
        let errors = validate_fields(&Self::fields(), data);
        if !errors.is_empty() {
            return Err(errors);
        }

        let get = |name: &str| data.get(name).cloned().unwrap_or_default();
        Ok(Self {
            username: get(USERNAME),
            pass: get(PASS),
            correo: get(CORREO),
            peso: Coerced::from_input(&get(PESO)),
            telefono: Coerced::from_input(&get(TELEFONO)),
        })
    }
}
