//! signup CLI
//!
//! Fills in the registration form from the command line and submits it.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use signup_client::{ClientConfig, RegistrationForm, SubmitOutcome, DEFAULT_ENDPOINT};
use signup_forms::schema::{CORREO, PASS, PESO, TELEFONO, USERNAME};

/// Register an account against the registration endpoint.
#[derive(Parser)]
#[command(name = "signup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Registration endpoint URL.
    #[arg(short, long, env = "SIGNUP_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the form and submit it.
    Register {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Print the form as HTML.
    Render {
        #[command(flatten)]
        fields: FieldArgs,

        /// Run validation first so errors are rendered under the fields.
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Args)]
struct FieldArgs {
    /// Public display name.
    #[arg(short, long, default_value = "")]
    username: String,

    /// Account password.
    #[arg(short, long, default_value = "")]
    password: String,

    /// E-mail address.
    #[arg(long, default_value = "")]
    email: String,

    /// Weight, e.g. 70.4.
    #[arg(long, default_value = "")]
    weight: String,

    /// Phone number.
    #[arg(long, default_value = "")]
    phone: String,
}

impl FieldArgs {
    fn fill(self, form: &mut RegistrationForm) -> signup_forms::Result<()> {
        form.set_value(USERNAME, self.username)?;
        form.set_value(PASS, self.password)?;
        form.set_value(CORREO, self.email)?;
        form.set_value(PESO, self.weight)?;
        form.set_value(TELEFONO, self.phone)?;
        Ok(())
    }
}

fn print_field_errors(form: &RegistrationForm) {
    let mut errors: Vec<_> = form.state().errors().iter().collect();
    errors.sort_by(|a, b| a.0.cmp(b.0));
    for (field, error) in errors {
        eprintln!("{field}: {}", error.message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ClientConfig::new(cli.endpoint)?;
    let endpoint = config.endpoint.clone();
    let mut form = RegistrationForm::new(config);

    match cli.command {
        Commands::Register { fields } => {
            fields.fill(&mut form)?;
            info!(%endpoint, "submitting registration form");

            let outcome = form.submit().await;
            print_field_errors(&form);
            match outcome {
                SubmitOutcome::Invalid(_) | SubmitOutcome::Conflict { .. } => {
                    return Ok(ExitCode::FAILURE);
                }
                SubmitOutcome::Registered
                | SubmitOutcome::Rejected(_)
                | SubmitOutcome::Failed(_) => {}
            }
        }

        Commands::Render { fields, validate } => {
            fields.fill(&mut form)?;
            if validate {
                if let Err(err) = form.state_mut().handle_submit() {
                    info!(%err, "form has errors");
                }
            }
            println!("{}", form.render());
        }
    }

    Ok(ExitCode::SUCCESS)
}
