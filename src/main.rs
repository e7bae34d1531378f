use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use cp_core::auth::SignupForm;
use cp_shell::bootstrap::{init_tracing_subscriber, resolve_config, wire_app};
use cp_shell::commands::{navigation, onboarding, session};
use serde::Serialize;
use tracing::debug;

#[derive(Parser)]
#[command(name = "coachpro")]
#[command(about = "CoachPro session and onboarding controller", long_about = None)]
struct Cli {
    /// TOML config file; platform defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current session
    Status,
    /// Log in with email and password
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account with an invite code and log in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        invite_code: String,
    },
    /// End the session and discard onboarding progress
    Logout,
    /// Request a password reset email
    ResetPassword {
        #[arg(short, long)]
        email: String,
    },
    /// Resolve a path through the route guard
    Navigate {
        /// e.g. /dashboard, /tools/swot
        path: String,
    },
    /// Onboarding wizard
    Onboarding {
        #[command(subcommand)]
        command: OnboardingCommands,
    },
}

#[derive(Subcommand)]
enum OnboardingCommands {
    /// Show the current step with pre-filled data
    Show,
    /// Submit the current step
    Continue {
        /// Step payload as JSON
        #[arg(long, conflicts_with = "file")]
        json: Option<String>,
        /// Read the step payload from a JSON file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Go back one step
    Back,
    /// Discard all saved progress
    Abandon,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = resolve_config(cli.config)?;
    let logs_dir = (!config.logs_dir.as_os_str().is_empty()).then_some(config.logs_dir.as_path());
    if let Err(err) = init_tracing_subscriber(logs_dir) {
        eprintln!("Failed to initialize tracing: {err}");
    }
    debug!(?config, "configuration resolved");

    let app = wire_app(&config)?;
    app.start().await;

    match cli.command {
        Commands::Status => print_json(&session::get_session_status(&app).await),
        Commands::Login { email, password } => {
            print_json(&session::login(&app, email, password).await.map_err(|e| anyhow!(e))?)
        }
        Commands::Signup {
            email,
            password,
            confirm_password,
            first_name,
            last_name,
            invite_code,
        } => {
            let form = SignupForm {
                email,
                password,
                confirm_password,
                first_name,
                last_name,
                invite_code,
            };
            print_json(&session::signup(&app, form).await.map_err(|e| anyhow!(e))?)
        }
        Commands::Logout => print_json(&session::logout(&app).await.map_err(|e| anyhow!(e))?),
        Commands::ResetPassword { email } => print_json(
            &session::reset_password(&app, email)
                .await
                .map_err(|e| anyhow!(e))?,
        ),
        Commands::Navigate { path } => print_json(
            &navigation::navigate(&app, path)
                .await
                .map_err(|e| anyhow!(e))?,
        ),
        Commands::Onboarding { command } => run_onboarding(&app, command).await,
    }
}

async fn run_onboarding(app: &cp_app::App, command: OnboardingCommands) -> Result<()> {
    match command {
        OnboardingCommands::Show => print_json(
            &onboarding::get_onboarding_state(app)
                .await
                .map_err(|e| anyhow!(e))?,
        ),
        OnboardingCommands::Continue { json, file } => {
            let raw = match (json, file) {
                (Some(json), _) => json,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => return Err(anyhow!("provide the step payload with --json or --file")),
            };
            let payload: serde_json::Value =
                serde_json::from_str(&raw).context("Step payload is not valid JSON")?;
            print_json(
                &onboarding::continue_onboarding(app, payload)
                    .await
                    .map_err(|e| anyhow!(e))?,
            )
        }
        OnboardingCommands::Back => print_json(
            &onboarding::onboarding_back(app)
                .await
                .map_err(|e| anyhow!(e))?,
        ),
        OnboardingCommands::Abandon => {
            onboarding::abandon_onboarding(app)
                .await
                .map_err(|e| anyhow!(e))?;
            println!("onboarding progress discarded");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
