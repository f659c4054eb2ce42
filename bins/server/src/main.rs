//! Clubdesk API server entry point.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use clubdesk_api::{AppState, create_router};
use clubdesk_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clubdesk=debug,tower_http=debug".into()),
        )
        .init();

    let config = AppConfig::load().expect("Failed to load configuration");

    let db = clubdesk_db::connect(&config.database.url).await?;
    info!("Connected to database");

    #[allow(clippy::cast_possible_wrap)]
    let token_expires_minutes = (config.jwt.token_expiry_secs / 60) as i64;
    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        token_expires_minutes,
    });

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
    };
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
