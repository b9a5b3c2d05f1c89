use clap::Parser;
use tracing::debug;

use query_layer::cli::Args;
use query_layer::config::ConfigFile;
use query_layer::db::{ConnectionBoundary, DatabaseConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config_file = ConfigFile::load_if_present()?;

    let logging = config_file
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    logging
        .to_log_config(args.log_level.as_deref())
        .init()
        .map_err(|e| e.to_string())?;

    let mut db = ConnectionBoundary::sqlite();
    if args.command.needs_connection() {
        let database = DatabaseConfig::resolve(args.db.as_deref(), config_file.as_ref())?;
        let mut options = config_file
            .as_ref()
            .map(ConfigFile::connect_options)
            .unwrap_or_default();
        options.read_only |= args.read_only;
        if args.required_version.is_some() {
            options.required_version = args.required_version;
        }

        debug!(database = %database.connection_string(), ?options, "resolved database");
        db.connect_with(&database.connection_string(), &options)?;
    }

    let output = args.command.run(&mut db, args.format)?;
    println!("{}", output);
    Ok(())
}
