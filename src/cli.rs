//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;

use crate::commands::Command;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Database location: a file path, `sqlite://<path>`, or `:memory:`.
    /// Falls back to .query_layer.json, then QUERY_LAYER_DB / DATABASE_URL,
    /// then ./query_layer.sqlite
    #[arg(short, long, global = true)]
    pub db: Option<String>,

    /// Open the database read-only
    #[arg(long, global = true)]
    pub read_only: bool,

    /// Refuse to connect unless the database carries this schema version
    #[arg(long, global = true, value_name = "N")]
    pub required_version: Option<i64>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Log filter used when RUST_LOG is unset, e.g. `info` or `query_layer=debug`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}
