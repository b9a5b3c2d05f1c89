//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - `execute.rs` producing a serializable result
//! - `output.rs` rendering that result as a table

mod compile;
mod query;
mod tables;

pub use compile::CompileCmd;
pub use query::QueryCmd;
pub use tables::TablesCmd;

use clap::Subcommand;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::db::{ConnectionBoundary, QueryModel};
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, db: &mut ConnectionBoundary) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a JSON query document against the database
    Query(QueryCmd),

    /// Print the SQL and parameters for a JSON query document without running it
    Compile(CompileCmd),

    /// List user tables in the database
    Tables(TablesCmd),

    /// Catch-all for unknown commands
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Command {
    /// Whether the command needs an open database connection.
    pub fn needs_connection(&self) -> bool {
        !matches!(self, Command::Compile(_) | Command::Unknown(_))
    }

    /// Execute the command and return formatted output
    pub fn run(
        self,
        db: &mut ConnectionBoundary,
        format: OutputFormat,
    ) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Query(cmd) => {
                let result = cmd.execute(db)?;
                Ok(result.format(format))
            }
            Command::Compile(cmd) => {
                let result = cmd.execute(db)?;
                Ok(result.format(format))
            }
            Command::Tables(cmd) => {
                let result = cmd.execute(db)?;
                Ok(result.format(format))
            }
            Command::Unknown(args) => {
                Err(format!("Unknown command: {}", args.first().unwrap_or(&String::new())).into())
            }
        }
    }
}

/// Check that a file exists before trying to read it.
pub(crate) fn validate_file_exists(path: &Path) -> Result<(), Box<dyn Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }
    if !path.is_file() {
        return Err(format!("Not a file: {}", path.display()).into());
    }
    Ok(())
}

/// Read and validate a JSON query document.
pub(crate) fn load_query_model(path: &Path) -> Result<QueryModel, Box<dyn Error>> {
    validate_file_exists(path)?;
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let model: QueryModel = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid query document {}: {}", path.display(), e))?;
    Ok(model)
}
