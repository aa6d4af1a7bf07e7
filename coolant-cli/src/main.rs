//! Coolant Pro CLI - log coolant chemistry readings and dosing recommendations.

use clap::Parser;
use coolant_core::config::AppConfig;
use coolant_db::Database;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "coolant-cli",
    version,
    about = "Coolant chemistry log for machine-shop technicians"
)]
struct Cli {
    /// SQLite database file (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true, default_value = "coolant_pro.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: coolant_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }
    log::debug!("[Coolant] cli: database {}", config.database_path.display());

    let db = Database::open(&config.database_path)?;
    coolant_cmd::run(cli.command, &db, &config)
}
