mod execute;
mod execute_tests;
mod output;

use std::path::PathBuf;

use clap::Args;

/// Run a JSON query document against the database
#[derive(Args, Debug)]
#[command(after_help = "\
Query document:
  {
    \"columns\": [\"routes.route_name\", \"summits.name AS summit\"],
    \"tables\": [\"routes\", \"summits\"],
    \"join_conditions\": [\"routes.summit_id = summits.id\"],
    \"filter\": { \"expression\": \"routes.grade >= ?\", \"params\": [4] },
    \"order_by\": [\"routes.grade DESC\"],
    \"limit\": 10
  }

Examples:
  query_layer query -f routes.json
  query_layer --format json query -f routes.json")]
pub struct QueryCmd {
    /// Path to the JSON query document
    #[arg(short, long)]
    pub file: PathBuf,
}
