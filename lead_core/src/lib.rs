//! Core library for the lead capture server: the WhatsApp dispatch pipeline,
//! the lead webhook and the HTTP wiring around them.

pub mod config;
pub mod database;
pub mod dispatch;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod notify;
pub mod services;
pub mod site;
pub mod store;
pub mod validation;

pub use config::AppConfig;
pub use database::{get_database_pool, run_migrations, DatabaseManager, LeadRepository};
pub use dispatch::{DispatchSettings, Dispatcher, HeadlessSurface};
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use middleware::cors::cors_layer_from_config;
pub use models::{DispatchResult, SubmissionPayload, SubmissionRecord, WebhookResponse};
pub use notify::{LogNotifier, MailSettings, Notifier, SmtpNotifier};
pub use services::LeadService;
pub use site::{FormVariant, SiteProfile};
pub use store::{LeadStore, MemoryLeadStore};

use axum::Router;
use std::{collections::HashMap, net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub lead_service: LeadService,
    pub sites: Arc<HashMap<String, SiteProfile>>,
    pub dispatch: DispatchSettings,
    pub db_manager: Option<DatabaseManager>,
}

impl Default for AppState {
    fn default() -> Self {
        let lead_service = LeadService::new(
            Arc::new(MemoryLeadStore::new()),
            Arc::new(LogNotifier),
            MailSettings::default(),
        );

        Self::new(lead_service)
    }
}

impl AppState {
    pub fn new(lead_service: LeadService) -> Self {
        let mut sites = HashMap::new();
        sites.insert("portfolio".to_string(), SiteProfile::portfolio());

        Self {
            app_name: "Lead Server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            lead_service,
            sites: Arc::new(sites),
            dispatch: DispatchSettings::default(),
            db_manager: None,
        }
    }

    /// Sites and dispatch timings taken from `config`.
    pub fn from_config(lead_service: LeadService, config: &AppConfig) -> Self {
        Self::new(lead_service)
            .with_sites(config.sites.clone())
            .with_dispatch_settings(config.dispatch_settings())
    }

    pub fn with_sites(mut self, sites: HashMap<String, SiteProfile>) -> Self {
        self.sites = Arc::new(sites);
        self
    }

    pub fn with_dispatch_settings(mut self, settings: DispatchSettings) -> Self {
        self.dispatch = settings;
        self
    }

    pub fn with_database(mut self, db_manager: DatabaseManager) -> Self {
        self.db_manager = Some(db_manager);
        self
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(cors_layer_from_config(&config.cors))
        .layer(middleware::logging::logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let app = app.into_make_service_with_connect_info::<SocketAddr>();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
