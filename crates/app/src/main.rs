//! Friendlines CLI entry point.

use clap::Parser;
use friendlines::Cli;
use friendlines_application::ApplicationError;
use friendlines_domain::AuthError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli.execute(&mut std::io::stdout()).await {
        eprintln!("Error: {e:#}");
        if needs_login(&e) {
            eprintln!("Run `friendlines login <username>` to sign in again.");
        }
        std::process::exit(1);
    }
}

fn needs_login(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<ApplicationError>()
        .map(ApplicationError::requires_login)
        .or_else(|| error.downcast_ref::<AuthError>().map(AuthError::requires_login))
        .unwrap_or(false)
}
