use anyhow::Result;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fithub_db::{schema, Connection};

#[derive(Parser, Debug)]
#[clap(name = "fithub-setup")]
struct Cli {
    #[clap(env = "FITHUB_DB", default_value = "members.sqlite3")]
    pub db: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the members database with all tables
    Init,
}

/// Initialize the database
async fn db_init(filename: &str) -> Result<()> {
    let conn = Connection::open(filename).await?;
    schema::install(&conn).await?;
    tracing::info!(filename, "database initialized");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Init => db_init(&cli.db).await?,
    }
    Ok(())
}
