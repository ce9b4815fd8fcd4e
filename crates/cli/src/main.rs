//! Agendabot CLI — the main entry point.
//!
//! Commands:
//! - `serve`    — Register the slash commands and start the interactions endpoint
//! - `register` — Register the slash commands only
//! - `add`      — Add an assignment from the terminal
//! - `remove`   — Remove an assignment from the terminal
//! - `list`     — Print the agenda table
//! - `doctor`   — Diagnose configuration and storage

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "agendabot",
    about = "Agendabot — homework agenda for a Discord class server",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Keep the agenda in memory instead of the JSON file
    #[arg(long, global = true)]
    ephemeral: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Register slash commands and serve Discord interactions
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Register the slash commands with Discord and exit
    Register,

    /// Add an assignment
    Add {
        subject: String,
        description: String,
        /// Due date, dd/mm/yyyy
        date: String,
    },

    /// Remove an assignment
    Remove { subject: String, description: String },

    /// Print the agenda
    List,

    /// Diagnose configuration and storage
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port, cli.ephemeral).await?,
        Commands::Register => commands::register::run().await?,
        Commands::Add {
            subject,
            description,
            date,
        } => commands::agenda::add(&subject, &description, &date, cli.ephemeral).await?,
        Commands::Remove {
            subject,
            description,
        } => commands::agenda::remove(&subject, &description, cli.ephemeral).await?,
        Commands::List => commands::agenda::list(cli.ephemeral).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
