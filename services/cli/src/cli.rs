use crate::commands::{
    self, ApplicantArgs, FormArgs, PdfArgs, ReportArgs, ScreenArgs, ValidateArgs,
};
use crate::error::AppError;
use clap::{Parser, Subcommand};
use singlekey::{telemetry, ClientConfig, Environment, SingleKeyClient, TelemetryConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "singlekey",
    about = "Run SingleKey tenant screenings from the command line",
    version
)]
struct Cli {
    /// Use the sandbox environment regardless of SINGLEKEY_ENV
    #[arg(long, global = true)]
    sandbox: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a full screening from a JSON request file
    Screen(ScreenArgs),
    /// Send the tenant a form to complete their own details
    Form(FormArgs),
    /// Fetch a screening report, optionally waiting until it is scored
    Report(ReportArgs),
    /// Fetch applicant information for a screening
    Applicant(ApplicantArgs),
    /// Check a screening for data errors
    Validate(ValidateArgs),
    /// Save the report PDF to disk
    Pdf(PdfArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    telemetry::init(&TelemetryConfig::from_env())?;

    let mut config = ClientConfig::from_env()?;
    if cli.sandbox {
        config = config.with_environment(Environment::Sandbox);
    }
    let client = SingleKeyClient::from_config(config)?;
    info!(base_url = client.base_url(), "singlekey client ready");

    match cli.command {
        Command::Screen(args) => commands::screen(&client, args),
        Command::Form(args) => commands::form(&client, args),
        Command::Report(args) => commands::report(&client, args),
        Command::Applicant(args) => commands::applicant(&client, args),
        Command::Validate(args) => commands::validate(&client, args),
        Command::Pdf(args) => commands::pdf(&client, args),
    }
}
