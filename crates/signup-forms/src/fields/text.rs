//! Text field types.

use crate::form::FormFieldDef;
use crate::validation::{EmailValidator, MinLengthValidator};
use crate::widgets::BootstrapTextInput;

/// Creates a text field that must hold at least `min_length` characters.
pub fn min_length_field(
    name: &str,
    label: &str,
    min_length: usize,
    message: &str,
) -> FormFieldDef {
    FormFieldDef::new(name, label, BootstrapTextInput::new().placeholder(label))
        .validator(MinLengthValidator::with_message(min_length, message))
}

/// Creates a password field.
pub fn password_field(name: &str, label: &str, min_length: usize, message: &str) -> FormFieldDef {
    FormFieldDef::new(
        name,
        label,
        BootstrapTextInput::password().placeholder(label),
    )
    .validator(MinLengthValidator::with_message(min_length, message))
}

/// Creates an email field.
pub fn email_field(name: &str, label: &str, message: &str) -> FormFieldDef {
    FormFieldDef::new(
        name,
        label,
        BootstrapTextInput::email().placeholder("your@email.com"),
    )
    .validator(EmailValidator::with_message(message))
}

/// Creates a number input. Its value is coerced, never rejected.
pub fn number_field(name: &str, label: &str, placeholder: &str) -> FormFieldDef {
    FormFieldDef::new(
        name,
        label,
        BootstrapTextInput::number().placeholder(placeholder),
    )
}
