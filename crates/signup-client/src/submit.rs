//! Submitting the registration form.

use signup_forms::{ErrorSource, FormError, FormState, RegistrationInput, ValidationErrors};
use tracing::{debug, error, info};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::response::RegisterResponse;
use crate::transport::{HttpTransport, Transport};

/// What happened to one submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid(ValidationErrors),
    /// The server accepted the registration.
    Registered,
    /// The server rejected a field value; the error is shown under `field`.
    Conflict {
        /// Field the error was attached to.
        field: &'static str,
        /// The server's error text.
        message: String,
    },
    /// The server refused for a reason not tied to a field. Logged only.
    Rejected(Option<String>),
    /// The request failed or the reply was unreadable. Logged only.
    Failed(ClientError),
}

impl SubmitOutcome {
    /// Whether the server accepted the registration.
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered)
    }
}

/// Sends validated registrations to the configured endpoint.
#[derive(Debug, Clone)]
pub struct Submitter<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl Submitter<HttpTransport> {
    /// Creates a submitter using a fresh HTTP client.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: Transport> Submitter<T> {
    /// Creates a submitter sending through `transport`.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Posts `input` and parses the reply.
    pub async fn send(&self, input: &RegistrationInput) -> Result<RegisterResponse> {
        let body = serde_json::to_value(input)?;
        let reply = self.transport.post_json(&self.config.endpoint, &body).await?;
        Ok(serde_json::from_value(reply)?)
    }
}

/// Applies the server's reply to the form.
///
/// Only a recognised conflict marks a field; every other failure is logged
/// and leaves the form untouched.
pub fn apply_response(
    form: &mut FormState<RegistrationInput>,
    response: RegisterResponse,
) -> SubmitOutcome {
    if response.success {
        info!("Registration successful");
        return SubmitOutcome::Registered;
    }

    if let Some(conflict) = response.conflict() {
        let field = conflict.field();
        let message = response
            .error
            .unwrap_or_else(|| conflict.message().to_string());
        if let Err(err) = form.set_error(field, message.clone(), ErrorSource::Server) {
            error!(%err, "could not attach server error");
        }
        return SubmitOutcome::Conflict { field, message };
    }

    error!(error = ?response.error, "Server error");
    SubmitOutcome::Rejected(response.error)
}

/// The registration form bound to a submitter.
#[derive(Debug)]
pub struct RegistrationForm<T = HttpTransport> {
    state: FormState<RegistrationInput>,
    submitter: Submitter<T>,
}

impl RegistrationForm<HttpTransport> {
    /// Creates an empty form posting over HTTP.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_submitter(Submitter::new(config))
    }
}

impl<T: Transport> RegistrationForm<T> {
    /// Creates an empty form sending through `submitter`.
    pub fn with_submitter(submitter: Submitter<T>) -> Self {
        Self {
            state: FormState::new(),
            submitter,
        }
    }

    /// Returns the form's values and errors.
    pub fn state(&self) -> &FormState<RegistrationInput> {
        &self.state
    }

    /// Returns the form's values and errors for editing.
    pub fn state_mut(&mut self) -> &mut FormState<RegistrationInput> {
        &mut self.state
    }

    /// Changes a field's value. See [`FormState::set_value`].
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) -> signup_forms::Result<()> {
        self.state.set_value(field, value)
    }

    /// Marks a field as having lost focus. See [`FormState::blur`].
    pub fn blur(&mut self, field: &str) -> signup_forms::Result<()> {
        self.state.blur(field)
    }

    /// Validates the form and, if valid, submits it.
    ///
    /// Every failure ends the attempt; nothing is retried.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let input = match self.state.handle_submit() {
            Ok(input) => input,
            Err(FormError::ValidationErrors(errors)) => return SubmitOutcome::Invalid(errors),
            Err(err) => {
                error!(%err, "could not validate form");
                return SubmitOutcome::Invalid(self.state.validation_errors());
            }
        };
        debug!(?input, "submitting registration");

        match self.submitter.send(&input).await {
            Ok(response) => apply_response(&mut self.state, response),
            Err(err) => {
                error!(%err, "registration request failed");
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Renders the form, posting to the configured endpoint.
    pub fn render(&self) -> String {
        self.state
            .render("Register", &self.submitter.config().endpoint)
    }
}
