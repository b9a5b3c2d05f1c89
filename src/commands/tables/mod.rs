mod cli_tests;
mod execute;
mod execute_tests;
mod output;

use clap::Args;

/// List user tables in the database
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  query_layer tables                  # All user tables
  query_layer tables --like 'route%'  # Tables matching a LIKE pattern")]
pub struct TablesCmd {
    /// SQL LIKE pattern to filter table names
    #[arg(long)]
    pub like: Option<String>,
}
