// ABOUTME: sqlmapper CLI - inspect in-list rewriting and effective mapper settings
// ABOUTME: Loads settings from the environment and prints results as JSON
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
//!
//! Usage:
//! ```bash
//! # Rewrite a command with the string_split strategy
//! sqlmapper-cli rewrite --sql "select * from T where id in @ids" \
//!     --param ids --kind int32 --values 1,2,3,4 --threshold 3
//!
//! # Positional placeholder
//! sqlmapper-cli rewrite --sql "select * from T where id in ?ids?" \
//!     --param ids --kind int64 --values 10,20 --threshold 0 --by-position
//!
//! # Show settings loaded from SQLMAPPER_* environment variables
//! sqlmapper-cli settings
//! ```

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqlmapper::config::MapperConfig;
use sqlmapper::logging::LoggingConfig;
use sqlmapper::settings;
use tracing::info;

use commands::rewrite::ElementKind;

#[derive(Parser)]
#[command(
    name = "sqlmapper-cli",
    about = "sqlmapper in-list expansion CLI",
    long_about = "Inspect how sqlmapper rewrites collection-valued parameters and which settings are in effect."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Offer a command to the in-list handler chain and print the result
    Rewrite {
        /// Command text
        #[arg(long)]
        sql: String,

        /// Name of the collection-valued parameter
        #[arg(long)]
        param: String,

        /// Element type of the collection
        #[arg(long, value_enum)]
        kind: ElementKind,

        /// Comma-separated element values
        #[arg(long, default_value = "")]
        values: String,

        /// `string_split` threshold override (-1 disables)
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<i32>,

        /// Treat the placeholder as pseudo-positional (`?name?`)
        #[arg(long)]
        by_position: bool,
    },

    /// Print the effective settings as JSON
    Settings,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let config = MapperConfig::from_env().context("Failed to load mapper configuration")?;
    let settings = settings::initialize(&config).context("Failed to apply mapper settings")?;
    info!("sqlmapper CLI");

    match cli.command {
        Command::Rewrite {
            sql,
            param,
            kind,
            values,
            threshold,
            by_position,
        } => {
            if let Some(threshold) = threshold {
                settings.set_inlist_string_split_count(threshold)?;
            }
            commands::rewrite::run(&sql, &param, kind, &values, by_position)?;
        }
        Command::Settings => commands::settings::show(settings)?,
    }

    Ok(())
}
