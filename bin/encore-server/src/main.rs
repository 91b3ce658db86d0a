//! Encore Platform Server
//!
//! Production server for the enrollment REST APIs: users and roles,
//! course offerings, carts, payments, and token issuance.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ENCORE_API_PORT` | `5000` | HTTP API port |
//! | `ENCORE_MONGO_URL` | `mongodb://localhost:27017` | MongoDB connection URL |
//! | `ENCORE_MONGO_DB` | `encore` | MongoDB database name |
//! | `ENCORE_JWT_SECRET` | - | HS256 signing secret |
//! | `ENCORE_TOKEN_EXPIRY_SECS` | `7200` | Token lifetime in seconds |
//! | `ENCORE_DEV_MODE` | `false` | Seed development data on startup |
//! | `RUST_LOG` | `info` | Log level |
//! | `LOG_FORMAT` | text | Set to `json` for JSON logs |

use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use encore_platform::seed::DevDataSeeder;
use encore_platform::{
    auth_router, carts_router, courses_router, health_router, payments_router, users_router,
    AppState, AuthApiState, AuthConfig, AuthLayer, AuthService, CartRepository, CartsState,
    CourseRepository, CoursesState, EnrollmentService, PaymentGateway, PaymentRepository,
    PaymentsState, StubGateway, UserRepository, UsersState,
};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    encore_common::logging::init_logging("encore-server");

    info!("Starting Encore Platform Server");

    // Configuration from environment
    let api_port: u16 = env_or_parse("ENCORE_API_PORT", 5000);
    let mongo_url = env_or("ENCORE_MONGO_URL", "mongodb://localhost:27017");
    let mongo_db = env_or("ENCORE_MONGO_DB", "encore");
    let jwt_secret = env_or("ENCORE_JWT_SECRET", "");
    let token_expiry_secs: i64 = env_or_parse("ENCORE_TOKEN_EXPIRY_SECS", 7200);

    // Connect to MongoDB
    info!("Connecting to MongoDB: {}/{}", mongo_url, mongo_db);
    let mongo_client = mongodb::Client::with_uri_str(&mongo_url).await?;
    let db = mongo_client.database(&mongo_db);

    // Seed development data if in dev mode
    let dev_mode = std::env::var("ENCORE_DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    if dev_mode {
        let seeder = DevDataSeeder::new(db.clone());
        if let Err(e) = seeder.seed().await {
            tracing::warn!("Dev data seeding skipped (data may already exist): {}", e);
        }
    }

    // Initialize repositories
    let user_repo = Arc::new(UserRepository::new(&db));
    let course_repo = Arc::new(CourseRepository::new(&db));
    let cart_repo = Arc::new(CartRepository::new(&db));
    let payment_repo = Arc::new(PaymentRepository::new(&db));
    info!("Repositories initialized");

    // Initialize auth
    let auth_service = Arc::new(AuthService::new(AuthConfig {
        secret_key: jwt_secret,
        token_expiry_secs,
    }));

    // Create AppState for the guard layer
    let app_state = AppState {
        auth_service: auth_service.clone(),
        user_repo: user_repo.clone(),
    };

    // Enrollment runs against the shared client so its writes share one
    // transaction session
    let enrollment = Arc::new(EnrollmentService::new(mongo_client.clone(), db.clone()));
    let gateway: Arc<dyn PaymentGateway> = Arc::new(StubGateway::new());

    // Build API states
    let auth_state = AuthApiState {
        auth_service: auth_service.clone(),
    };
    let users_state = UsersState {
        user_repo: user_repo.clone(),
    };
    let courses_state = CoursesState { course_repo };
    let carts_state = CartsState { cart_repo };
    let payments_state = PaymentsState {
        payment_repo,
        enrollment,
        gateway,
    };

    // Build API router using OpenApiRouter for auto-collected OpenAPI paths
    let (router, mut openapi) = OpenApiRouter::new()
        .merge(auth_router(auth_state))
        .merge(users_router(users_state))
        .merge(courses_router(courses_state))
        .merge(carts_router(carts_state))
        .merge(payments_router(payments_state))
        .split_for_parts();

    openapi.info.title = "Encore Platform API".to_string();
    openapi.info.version = "1.0.0".to_string();
    openapi.info.description =
        Some("REST APIs for enrollment, courses, carts, and payments".to_string());

    let app = Router::new()
        .route("/", get(root))
        .merge(router)
        .merge(health_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/q/openapi", openapi))
        // Auth middleware
        .layer(AuthLayer::new(app_state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start API server
    let api_addr = format!("0.0.0.0:{}", api_port);
    info!("API server listening on http://{}", api_addr);

    let listener = TcpListener::bind(&api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Encore Platform Server shutdown complete");
    Ok(())
}

async fn root() -> &'static str {
    "Encore music school is up"
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
