//! Main entry point for the lead capture server binary

use anyhow::Result;
use lead_core::{
    create_app_with_config, get_database_pool, run_migrations, run_server, AppConfig, AppState,
    DatabaseManager, LeadRepository, LeadService, LeadStore, LogNotifier, MemoryLeadStore,
    Notifier, SmtpNotifier,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());

    let addr: SocketAddr = config.bind_address().parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let (store, db_manager): (Arc<dyn LeadStore>, Option<DatabaseManager>) = if config.uses_database() {
        info!("Initializing database connection: {}", config.database.url);

        match initialize_database(&config).await {
            Ok((db_manager, repository)) => {
                info!("Database initialized successfully");
                (Arc::new(repository), Some(db_manager))
            }
            Err(e) => {
                warn!("Failed to initialize database, falling back to in-memory store: {}", e);
                (Arc::new(MemoryLeadStore::new()), None)
            }
        }
    } else {
        info!("Using in-memory lead store");
        (Arc::new(MemoryLeadStore::new()), None)
    };

    let notifier: Arc<dyn Notifier> = if config.mail.enabled {
        let smtp = SmtpNotifier::new(&config.smtp_config())
            .map_err(|e| anyhow::anyhow!("Failed to configure SMTP: {}", e))?;
        Arc::new(smtp)
    } else {
        info!("Mail delivery disabled, lead notifications will only be logged");
        Arc::new(LogNotifier)
    };

    let lead_service = LeadService::new(store, notifier, config.mail_settings());

    let mut state = AppState::from_config(lead_service, &config);
    if let Some(db_manager) = db_manager {
        state = state.with_database(db_manager);
    }

    info!("App: {} v{}", state.app_name, state.version);
    info!("Lead storage: {}", state.lead_service.store().kind());
    info!("Sites: {}", state.sites.keys().cloned().collect::<Vec<_>>().join(", "));

    let app = create_app_with_config(state, &config);

    run_server(app, addr).await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn initialize_database(config: &AppConfig) -> Result<(DatabaseManager, LeadRepository)> {
    let pool = get_database_pool(&config.database.url, config.database.max_connections).await
        .map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?;

    run_migrations(pool.clone()).await
        .map_err(|e| anyhow::anyhow!("Failed to run database migrations: {}", e))?;

    Ok((DatabaseManager::new(pool.clone()), LeadRepository::new(pool)))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let default_level = if cfg!(debug_assertions) {
                "debug"
            } else {
                "info"
            };

            format!(
                "{}={},lead_core={},tower_http=info",
                env!("CARGO_CRATE_NAME").replace('-', "_"),
                default_level,
                default_level
            ).into()
        });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
