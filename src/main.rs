use std::sync::{Arc, Mutex};

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use slotdesk::config::AppConfig;
use slotdesk::controller::ViewController;
use slotdesk::db;
use slotdesk::handlers;
use slotdesk::services::api::ApiClient;
use slotdesk::services::session::TokenStore;
use slotdesk::services::toasts::Toasts;
use slotdesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    let tokens = Arc::new(TokenStore::load(Arc::new(Mutex::new(conn)))?);
    let toasts = Toasts::new(config.toast_ttl);

    let api = ApiClient::new(&config.api_url, config.api_timeout, tokens, toasts.clone())?;
    tracing::info!("using booking API at {}", api.base_url());

    let controller = ViewController::new(api, toasts.clone());
    controller.initialize().await;

    let state = Arc::new(AppState { controller, toasts });

    let app = handlers::router(state).layer(TraceLayer::new_for_http());

    let addr = format!("127.0.0.1:{}", config.port);
    tracing::info!("starting server on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
