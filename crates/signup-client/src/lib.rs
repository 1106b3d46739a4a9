//! # signup-client
//!
//! Submits the registration form to the registration endpoint and maps the
//! server's field conflicts back onto the form.
//!
//! ## Quick Start
//!
//! ```no_run
//! use signup_client::{ClientConfig, RegistrationForm, SubmitOutcome};
//! use signup_forms::schema::{CORREO, PASS, USERNAME};
//!
//! # async fn run() -> signup_forms::Result<()> {
//! let mut form = RegistrationForm::new(ClientConfig::default());
//! form.set_value(USERNAME, "ana")?;
//! form.set_value(PASS, "correcthorse")?;
//! form.set_value(CORREO, "ana@example.com")?;
//!
//! match form.submit().await {
//!     SubmitOutcome::Registered => println!("welcome"),
//!     SubmitOutcome::Conflict { field, message } => println!("{field}: {message}"),
//!     _ => {}
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom transports
//!
//! The network call goes through the [`Transport`] trait, so the form can be
//! driven without a live server:
//!
//! ```ignore
//! struct Canned(serde_json::Value);
//!
//! impl Transport for Canned {
//!     fn post_json<'a>(&'a self, _url: &'a str, _body: &'a Value) -> BoxFuture<'a, Result<Value>> {
//!         Box::pin(async move { Ok(self.0.clone()) })
//!     }
//! }
//!
//! let submitter = Submitter::with_transport(ClientConfig::default(), Canned(json!({"success": true})));
//! let mut form = RegistrationForm::with_submitter(submitter);
//! ```

pub mod config;
mod error;
pub mod response;
mod submit;
pub mod transport;

pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use error::{ClientError, Result};
pub use response::{RegisterResponse, ServerConflict};
pub use submit::{apply_response, RegistrationForm, SubmitOutcome, Submitter};
pub use transport::{HttpTransport, Transport};
