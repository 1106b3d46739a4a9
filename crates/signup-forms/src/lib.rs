//! # signup-forms
//!
//! The registration form: schema, validators, state controller and
//! Bootstrap 5 rendering.
//!
//! This crate provides:
//! - Field definitions with validators
//! - The [`RegistrationInput`] schema and its input coercion
//! - A [`FormState`] controller tracking values and per-field errors
//! - Form rendering helpers
//!
//! ## Quick Start
//!
//! ```rust
//! use signup_forms::{FormState, RegistrationInput};
//! use signup_forms::schema::{CORREO, PASS, PESO, USERNAME};
//!
//! let mut form = FormState::<RegistrationInput>::new();
//! form.set_value(USERNAME, "ana").unwrap();
//! form.set_value(PASS, "correcthorse").unwrap();
//! form.set_value(CORREO, "ana@example.com").unwrap();
//! form.set_value(PESO, "70.4").unwrap();
//!
//! let input = form.handle_submit().unwrap();
//! assert_eq!(input.peso.as_f64(), Some(70.4));
//! assert!(input.telefono.is_empty());
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use signup_forms::{FormState, RegistrationInput};
//! use signup_forms::schema::{USERNAME, USERNAME_TOO_SHORT};
//!
//! let mut form = FormState::<RegistrationInput>::new();
//! form.set_value(USERNAME, "a").unwrap();
//!
//! assert!(form.handle_submit().is_err());
//! assert_eq!(form.error(USERNAME).unwrap().message, USERNAME_TOO_SHORT);
//! ```
//!
//! ## Rendering
//!
//! ```rust
//! use signup_forms::{FormState, RegistrationInput};
//!
//! let form = FormState::<RegistrationInput>::new();
//! let html = form.render("Register", "/api/register");
//! assert!(html.contains("Phone number"));
//! ```

mod error;
pub mod fields;
mod form;
pub mod schema;
mod state;
pub mod validation;
pub mod widgets;

pub use error::{FormError, Result, ValidationErrors};
pub use form::{
    render_bootstrap_field, render_bootstrap_form, validate_fields, FormFieldDef,
    Schema,
};
pub use schema::{coerce_number, Coerced, RegistrationInput};
pub use state::{ErrorSource, FieldError, FormState, ValidationMode};
