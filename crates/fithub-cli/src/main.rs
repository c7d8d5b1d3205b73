
use anyhow::Result;
use dotenvy::dotenv;

use fithub_db::Connection;
use fithub_cli::{
    cli::{Command, Cli},
    logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    logging::init();
    let cli = Cli::init();

    let conn = Connection::open(&cli.db).await?;
    match cli.command {
        Command::Members(cmd) => cmd.run(&conn).await,
        Command::Payments(cmd) => cmd.run(&conn).await,
        Command::Schedule(cmd) => cmd.run(&conn).await,
    }?;

    Ok(())
}
