//! Reusable back-office runtime.
//!
//! Provides [`AppRuntime`] that encapsulates bootstrap: database connection,
//! migrations, default admin seeding, and shutdown. The CLI binary drives it;
//! embedders can keep the handle and use its repositories directly.

use std::fmt;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use crate::config::{AdminSettings, AppConfig};
use crate::domain::{Admin, NewAdmin, RepositoryProvider, StoreError};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::{init_database, SeaOrmRepositoryProvider};
use crate::shared::types::AppError;

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the runtime.
pub struct RuntimeOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Connection URL that wins over every configured source.
    pub database_url: Option<String>,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured admin if no admin exists (default: true).
    pub seed_default_admin: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            database_url: None,
            auto_migrate: true,
            seed_default_admin: true,
        }
    }
}

// ── AppRuntime ─────────────────────────────────────────────────────

/// Handle to an initialised back office.
///
/// # Examples
///
/// ```rust,no_run
/// use escape_core::runtime::{AppRuntime, RuntimeOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let runtime = AppRuntime::start(RuntimeOptions::default()).await?;
///     println!("{}", runtime.summary().await?);
///     runtime.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct AppRuntime {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the runtime was started with.
    pub config: AppConfig,

    db: DatabaseConnection,
}

impl AppRuntime {
    /// Start the runtime with the given options.
    ///
    /// This will:
    /// 1. Connect to the database
    /// 2. Run migrations (if enabled)
    /// 3. Seed the default admin (if enabled and no admin exists)
    pub async fn start(opts: RuntimeOptions) -> Result<Self, AppError> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting escape-room back office...");

        let mut db_config = app_cfg.database.to_database_config();
        if let Some(url) = opts.database_url {
            db_config.url = url;
        }

        let db = init_database(&db_config)
            .await
            .map_err(StoreError::from)?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await.map_err(StoreError::from)?;
            info!("Migrations completed");
        }

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        if opts.seed_default_admin {
            seed_default_admin(repos.as_ref(), &app_cfg.admin).await?;
        }

        Ok(Self {
            repos,
            config: app_cfg,
            db,
        })
    }

    /// Count what is currently stored.
    pub async fn summary(&self) -> Result<StoreSummary, StoreError> {
        Ok(StoreSummary {
            admins: self.repos.admins().count().await?,
            offices: self.repos.offices().count().await?,
            themes: self.repos.themes().count().await?,
        })
    }

    /// Close the database connection.
    pub async fn shutdown(self) {
        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
    }
}

/// Row counts per aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSummary {
    pub admins: u64,
    pub offices: u64,
    pub themes: u64,
}

impl fmt::Display for StoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "admins: {}, offices: {}, themes: {}",
            self.admins, self.offices, self.themes
        )
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Create the configured admin if no admin exists yet.
///
/// Returns the stored admin when one was created.
pub async fn seed_default_admin(
    repos: &dyn RepositoryProvider,
    settings: &AdminSettings,
) -> Result<Option<Admin>, AppError> {
    if repos.admins().count().await? > 0 {
        return Ok(None);
    }

    info!("Creating default admin...");
    let admin = Admin::new(NewAdmin {
        login_id: settings.login_id.clone(),
        password: settings.password.clone(),
        name: settings.name.clone(),
        phone_number: settings.phone_number.clone(),
        role: settings.role()?,
    })?;
    let saved = repos.admins().save(admin).await?;

    info!("Default admin created: {}", saved.login_id());
    warn!("Please change the default admin password immediately!");
    Ok(Some(saved))
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`AppRuntime::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
