mod execute;
mod output;

use std::path::PathBuf;

use clap::Args;

/// Print the SQL and parameters for a JSON query document without running it
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  query_layer compile -f routes.json
  query_layer --format json compile -f routes.json")]
pub struct CompileCmd {
    /// Path to the JSON query document
    #[arg(short, long)]
    pub file: PathBuf,
}
