//! Form state controller.
//!
//! [`FormState`] owns the raw field values and the error shown under each
//! field. Validation runs on the triggers selected by [`ValidationMode`];
//! once the form has been submitted, every change re-validates the changed
//! field. Errors reported by a server are attached with
//! [`FormState::set_error`] and stay until the field is re-validated or the
//! form is submitted again.

use std::collections::HashMap;
use std::marker::PhantomData;

use tracing::debug;

use crate::error::{FormError, Result, ValidationErrors};
use crate::form::{render_bootstrap_form, Schema};

/// Where a field error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSource {
    /// Detected locally by a validator.
    Validation,
    /// Reported by the server after submission.
    Server,
}

/// An error attached to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Text shown under the field.
    pub message: String,
    /// Who reported it.
    pub source: ErrorSource,
}

/// When fields are validated before the first submit attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Only on submit.
    #[default]
    OnSubmit,
    /// When a field loses focus.
    OnBlur,
    /// On every change.
    OnChange,
    /// On blur and on change.
    All,
}

impl ValidationMode {
    const fn on_change(self) -> bool {
        matches!(self, Self::OnChange | Self::All)
    }

    const fn on_blur(self) -> bool {
        matches!(self, Self::OnBlur | Self::All)
    }
}

/// Values and per-field errors of a form described by `S`.
#[derive(Debug, Clone)]
pub struct FormState<S: Schema> {
    values: HashMap<String, String>,
    errors: HashMap<String, FieldError>,
    mode: ValidationMode,
    submitted: bool,
    _schema: PhantomData<S>,
}

impl<S: Schema> Default for FormState<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Schema> FormState<S> {
    /// Creates a form with every field set to the empty string.
    pub fn new() -> Self {
        Self::with_mode(ValidationMode::default())
    }

    /// Creates a form validating with `mode`.
    pub fn with_mode(mode: ValidationMode) -> Self {
        let values = S::fields()
            .into_iter()
            .map(|field| (field.name, String::new()))
            .collect();
        Self {
            values,
            errors: HashMap::new(),
            mode,
            submitted: false,
            _schema: PhantomData,
        }
    }

    /// Returns the validation mode used before the first submit.
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Whether a submit has been attempted.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Returns the raw value of a field.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Returns every raw value keyed by field name.
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// Changes a field's value, re-validating it if the mode asks for it.
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        let slot = self
            .values
            .get_mut(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        *slot = value.into();

        if self.submitted || self.mode.on_change() {
            self.revalidate(field)?;
        }
        Ok(())
    }

    /// Marks a field as having lost focus.
    pub fn blur(&mut self, field: &str) -> Result<()> {
        if !self.values.contains_key(field) {
            return Err(FormError::UnknownField(field.to_string()));
        }
        if !self.submitted && self.mode.on_blur() {
            self.revalidate(field)?;
        }
        Ok(())
    }

    fn revalidate(&mut self, field: &str) -> Result<()> {
        let value = self.value(field).unwrap_or_default();
        let messages = S::validate_field(field, value)?;
        match messages.into_iter().next() {
            Some(message) => {
                self.errors.insert(
                    field.to_string(),
                    FieldError {
                        message,
                        source: ErrorSource::Validation,
                    },
                );
            }
            None => {
                self.errors.remove(field);
            }
        }
        Ok(())
    }

    /// Attaches an error to a field.
    pub fn set_error(
        &mut self,
        field: &str,
        message: impl Into<String>,
        source: ErrorSource,
    ) -> Result<()> {
        if !self.values.contains_key(field) {
            return Err(FormError::UnknownField(field.to_string()));
        }
        let message = message.into();
        debug!(field, %message, ?source, "field error set");
        self.errors
            .insert(field.to_string(), FieldError { message, source });
        Ok(())
    }

    /// Returns the error currently shown under a field.
    pub fn error(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// Returns every field error keyed by field name.
    pub fn errors(&self) -> &HashMap<String, FieldError> {
        &self.errors
    }

    /// Whether no field holds an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Removes every field error, leaving the values untouched.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Restores the initial state: empty values, no errors, not submitted.
    pub fn reset(&mut self) {
        *self = Self::with_mode(self.mode);
    }

    /// Validates the whole form.
    ///
    /// The error state is replaced by the result, so errors from a previous
    /// submission (including server errors) are dropped. Returns the typed
    /// record only when every field is valid, otherwise
    /// [`FormError::ValidationErrors`] with every violation.
    pub fn handle_submit(&mut self) -> Result<S> {
        self.submitted = true;
        match S::parse(&self.values) {
            Ok(parsed) => {
                self.errors.clear();
                Ok(parsed)
            }
            Err(errors) => {
                debug!(fields = errors.len(), "submission blocked by validation");
                self.errors = errors
                    .errors
                    .iter()
                    .filter_map(|(field, messages)| {
                        let message = messages.first()?.clone();
                        Some((
                            field.clone(),
                            FieldError {
                                message,
                                source: ErrorSource::Validation,
                            },
                        ))
                    })
                    .collect();
                Err(FormError::ValidationErrors(errors))
            }
        }
    }

    /// Current errors as a [`ValidationErrors`] collection.
    pub fn validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for (field, error) in &self.errors {
            errors.add(field, error.message.clone());
        }
        errors
    }

    /// Renders the form with its current values and errors.
    pub fn render(&self, title: &str, action: &str) -> String {
        render_bootstrap_form(
            title,
            &S::fields(),
            &self.values,
            &self.validation_errors(),
            action,
            "POST",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        RegistrationInput, CORREO, INVALID_EMAIL, PASS, PASSWORD_TOO_SHORT, PESO, USERNAME,
        USERNAME_TOO_SHORT,
    };

    type Form = FormState<RegistrationInput>;

    fn filled() -> Form {
        let mut form = Form::new();
        form.set_value(USERNAME, "ana").unwrap();
        form.set_value(PASS, "correcthorse").unwrap();
        form.set_value(CORREO, "ana@example.com").unwrap();
        form
    }

    #[test]
    fn test_defaults_are_empty() {
        let form = Form::new();
        assert_eq!(form.value(USERNAME), Some(""));
        assert_eq!(form.value(PESO), Some(""));
        assert_eq!(form.values().len(), 5);
        assert!(form.is_valid());
        assert!(!form.is_submitted());
        assert_eq!(form.mode(), ValidationMode::OnSubmit);
    }

    #[test]
    fn test_on_submit_mode_defers_validation() {
        let mut form = Form::new();
        form.set_value(USERNAME, "a").unwrap();
        form.blur(USERNAME).unwrap();
        assert!(form.error(USERNAME).is_none());
    }

    #[test]
    fn test_short_username_blocks_submit() {
        let mut form = filled();
        form.set_value(USERNAME, "a").unwrap();

        assert!(form.handle_submit().is_err());
        assert_eq!(
            form.error(USERNAME),
            Some(&FieldError {
                message: USERNAME_TOO_SHORT.to_string(),
                source: ErrorSource::Validation,
            })
        );
        assert!(form.error(PASS).is_none());
    }

    #[test]
    fn test_short_password_blocks_submit() {
        let mut form = filled();
        form.set_value(PASS, "1234567").unwrap();

        assert!(form.handle_submit().is_err());
        assert_eq!(form.error(PASS).unwrap().message, PASSWORD_TOO_SHORT);
    }

    #[test]
    fn test_blocked_submit_returns_every_violation() {
        let mut form = Form::new();
        form.set_value(USERNAME, "a").unwrap();

        let Err(FormError::ValidationErrors(errors)) = form.handle_submit() else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.first(USERNAME), Some(USERNAME_TOO_SHORT));
        assert_eq!(errors, form.validation_errors());
    }

    #[test]
    fn test_bad_email_blocks_submit() {
        let mut form = filled();
        form.set_value(CORREO, "ana@").unwrap();

        assert!(form.handle_submit().is_err());
        assert_eq!(form.error(CORREO).unwrap().message, INVALID_EMAIL);
    }

    #[test]
    fn test_revalidates_on_change_after_submit() {
        let mut form = filled();
        form.set_value(USERNAME, "a").unwrap();
        assert!(form.handle_submit().is_err());

        form.set_value(USERNAME, "ab").unwrap();
        assert!(form.error(USERNAME).is_none());

        form.set_value(USERNAME, "b").unwrap();
        assert_eq!(form.error(USERNAME).unwrap().message, USERNAME_TOO_SHORT);
    }

    #[test]
    fn test_on_blur_mode() {
        let mut form = Form::with_mode(ValidationMode::OnBlur);
        form.set_value(USERNAME, "a").unwrap();
        assert!(form.error(USERNAME).is_none());

        form.blur(USERNAME).unwrap();
        assert_eq!(form.error(USERNAME).unwrap().message, USERNAME_TOO_SHORT);
    }

    #[test]
    fn test_on_change_mode() {
        let mut form = Form::with_mode(ValidationMode::OnChange);
        form.set_value(PASS, "short").unwrap();
        assert_eq!(form.error(PASS).unwrap().message, PASSWORD_TOO_SHORT);

        form.set_value(PASS, "long enough").unwrap();
        assert!(form.error(PASS).is_none());
    }

    #[test]
    fn test_server_error_is_tagged() {
        let mut form = filled();
        assert!(form.handle_submit().is_ok());

        form.set_error(USERNAME, "Username already exists", ErrorSource::Server)
            .unwrap();
        let error = form.error(USERNAME).unwrap();
        assert_eq!(error.message, "Username already exists");
        assert_eq!(error.source, ErrorSource::Server);
        assert!(!form.is_valid());
    }

    #[test]
    fn test_server_error_cleared_by_resubmit_and_change() {
        let mut form = filled();
        assert!(form.handle_submit().is_ok());
        form.set_error(USERNAME, "Username already exists", ErrorSource::Server)
            .unwrap();

        assert!(form.handle_submit().is_ok());
        assert!(form.error(USERNAME).is_none());

        form.set_error(USERNAME, "Username already exists", ErrorSource::Server)
            .unwrap();
        form.set_value(USERNAME, "ana2").unwrap();
        assert!(form.error(USERNAME).is_none());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut form = Form::new();
        assert!(matches!(
            form.set_value("edad", "30"),
            Err(FormError::UnknownField(_))
        ));
        assert!(form.set_error("edad", "x", ErrorSource::Server).is_err());
        assert!(form.blur("edad").is_err());
    }

    #[test]
    fn test_reset_and_clear() {
        let mut form = filled();
        form.set_value(USERNAME, "a").unwrap();
        assert!(form.handle_submit().is_err());

        form.clear_errors();
        assert!(form.is_valid());

        form.reset();
        assert_eq!(form.value(USERNAME), Some(""));
        assert!(!form.is_submitted());
    }

    #[test]
    fn test_render_shows_errors_under_fields() {
        let mut form = filled();
        form.set_value(USERNAME, "a").unwrap();
        assert!(form.handle_submit().is_err());

        let html = form.render("Register", "/api/register");
        assert!(html.contains(USERNAME_TOO_SHORT));
        assert!(html.contains("is-invalid"));
        assert!(html.contains("This is your public display name."));
        assert!(html.contains("your@email.com"));
    }
}
