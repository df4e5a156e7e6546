//! Escape-room back office - admin CLI
//!
//! Prepares a back-office database: applies migrations, seeds the configured
//! admin into an empty store, and reports what is stored.
//!
//! ```sh
//! # Run with default config (~/.config/escape-core/config.toml)
//! escape-admin
//!
//! # Custom config path and database
//! escape-admin --config /etc/escape-core/config.toml --database-url sqlite://./escape.db?mode=rwc
//!
//! # Validate config without touching the database
//! escape-admin --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use escape_core::config::AppConfig;
use escape_core::runtime::{init_tracing, AppRuntime, RuntimeOptions};

/// Escape-room back office administration.
#[derive(Parser, Debug)]
#[command(
    name = "escape-admin",
    version,
    about = "Prepare and inspect the escape-room back-office database",
    long_about = "Connects to the back-office database, applies migrations, \
                  seeds the default admin when none exists and prints a summary.\n\n\
                  Default config: ~/.config/escape-core/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ESCAPE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the database connection URL.
    #[arg(long)]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without connecting.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(escape_core::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) if cli.check => return Err(e.into()),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        let database = cli
            .database_url
            .clone()
            .unwrap_or_else(|| config.database.connection_url());
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Database    : {}", database);
        println!("   Log level   : {}", config.logging.level);
        println!("   Admin       : {} ({})", config.admin.login_id, config.admin.role);
        return Ok(());
    }

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }
    if let Some(ref url) = cli.database_url {
        info!("CLI override: database_url = {}", url);
    }

    // ── Start runtime ──────────────────────────────────────────
    let runtime = AppRuntime::start(RuntimeOptions {
        config,
        database_url: cli.database_url,
        auto_migrate: !cli.no_migrate,
        seed_default_admin: !cli.no_admin,
    })
    .await?;

    let summary = runtime.summary().await?;
    info!("Store summary: {}", summary);
    println!("{}", summary);

    runtime.shutdown().await;
    Ok(())
}
