use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use storage::Database;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;
mod state;

use config::Config;
use oracle::{BalanceOracle, HyperliquidClient};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::auth::handlers::register,
        features::auth::handlers::login,
        features::auth::handlers::me,
        features::admin::handlers::list_participants,
        features::admin::handlers::approve_participant,
        features::admin::handlers::reject_participant,
        features::admin::handlers::update_participant,
        features::leaderboard::handlers::get_leaderboard,
        features::leaderboard::handlers::list_ranked_participants,
    ),
    components(
        schemas(
            storage::dto::auth::LoginRequest,
            storage::dto::auth::TokenResponse,
            storage::dto::auth::RegisterResponse,
            storage::dto::participant::RegisterRequest,
            storage::dto::participant::UpdateParticipantRequest,
            storage::dto::participant::ParticipantResponse,
            storage::dto::participant::RankedParticipantResponse,
            storage::dto::leaderboard::LeaderboardEntry,
        )
    ),
    tags(
        (name = "auth", description = "Registration and authentication endpoints"),
        (name = "admin", description = "Participant approval and management endpoints"),
        (name = "leaderboard", description = "Leaderboard refresh and standings endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Trading Competition API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let oracle_client = HyperliquidClient::new(
        &config.oracle_api_url,
        Duration::from_secs(config.oracle_timeout_secs),
    )
    .context("Failed to build balance oracle client")?;
    tracing::info!("Balance oracle client ready at: {}", config.oracle_api_url);

    let state = AppState {
        db,
        oracle: Arc::new(oracle_client) as Arc<dyn BalanceOracle>,
        jwt_secret: config.jwt_secret.clone(),
        failed_fetch_policy: config.failed_fetch_policy,
        refresh_lock: Arc::new(Mutex::new(())),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(routes::router(state))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
