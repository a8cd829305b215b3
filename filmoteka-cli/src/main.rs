//! filmoteka CLI - runs the actor/film catalog HTTP service
//!
//! Settings come from flags, environment variables, or a `.env` file in
//! the working directory (flags win, then the environment, then `.env`).

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::serve::{run_serve, ServeArgs};

#[derive(Parser, Debug)]
#[command(
    name = "filmoteka",
    author,
    version,
    about = "HTTP catalog of actors and films backed by PostgreSQL"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Existing variables take precedence over .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => run_serve(args).await,
    }
}
