//! Form field definitions.

mod text;

pub use text::{email_field, min_length_field, number_field, password_field};
