use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use board_service::{handlers, AppState, Config};
use crypto_core::TokenAuthority;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Board Service
///
/// Account sign-up/sign-in with stateless session tokens, and a shared
/// in-memory collection of posts with nested comments.
///
/// # Routes
///
/// - `POST /signup` - Register an account
/// - `POST /signin` - Exchange credentials for a `token` session cookie
/// - `GET  /posts` - List all posts (public)
/// - `POST /posts` - Create a post (authenticated)
/// - `POST /posts/{id}/comments` - Comment on a post (authenticated)
///
/// # Deployment
///
/// Listens on port 8080 by default (configurable via BOARD_SERVICE_PORT).
/// All state lives in process memory and is lost on restart.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::info!("Starting board-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let tokens = TokenAuthority::new(config.auth.jwt_secret.as_bytes())
        .context("Failed to initialize session token authority")?;

    let state = web::Data::new(
        AppState::new(tokens).with_secure_cookies(config.auth.cookie_secure),
    );

    let http_bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", http_bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();

    // actix-web installs SIGINT/SIGTERM handlers and drains workers on shutdown
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(build_cors(&allowed_origins))
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&http_bind_address)
    .with_context(|| format!("Failed to bind {}", http_bind_address))?
    .workers(config.app.workers)
    .shutdown_timeout(30)
    .run()
    .await
    .context("HTTP server terminated with error")?;

    tracing::info!("board-service stopped");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_cors(allowed_origins: &str) -> Cors {
    let mut cors = Cors::default();
    for origin in allowed_origins.split(',') {
        let origin = origin.trim();
        if origin.is_empty() {
            continue;
        }
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }
    cors.allow_any_method().allow_any_header().max_age(3600)
}
