//! Apply the embedded schema migrations to a PostgreSQL database.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;

use bookings::outbound::persistence::run_pending_migrations;
use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};

/// `bookings-migrate` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bookings-migrate",
    about = "Apply pending bookings schema migrations",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();

    let database_url = match args.database_url {
        Some(url) => url,
        None => env::var("DATABASE_URL")
            .map_err(|_| eyre!("pass --database-url or set DATABASE_URL"))?,
    };

    let applied = run_pending_migrations(&database_url).wrap_err("apply migrations")?;
    if applied.is_empty() {
        println!("schema is up to date");
    }
    for version in applied {
        println!("applied={version}");
    }
    Ok(())
}
