mod cli;
mod commands;
mod error;

pub use error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
