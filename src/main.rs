use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware::from_fn;
use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod services;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = crate::config::config();
    tracing::info!("Starting NithShop API in {:?} mode", config.environment);

    // Bring the schema up to date; a missing database degrades /health
    // instead of blocking startup.
    match database::manager::DatabaseManager::pool().await {
        Ok(pool) => {
            if let Err(e) = database::migrate::apply(&pool).await {
                tracing::error!("Schema migration failed: {}", e);
            }
        }
        Err(e) => tracing::warn!("Database unavailable at startup: {}", e),
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("NITHSHOP_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(4000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("NithShop API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes (token acquisition)
        .merge(public_auth_routes())
        // Protected API
        .merge(protected_auth_routes())
        .merge(admin_routes())
        .merge(admin_management_routes())
        .merge(occupant_routes())
        .merge(file_routes())
        .merge(communication_routes())
        // Global middleware
        .layer(
            tower::ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer())
                .layer(DefaultBodyLimit::max(
                    crate::config::config().api.max_request_size_bytes,
                )),
        )
}

fn cors_layer() -> CorsLayer {
    let security = &crate::config::config().security;

    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

fn public_auth_routes() -> Router {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new()
        .route("/api/auth/admin/login", post(auth::admin_login))
        .route("/api/auth/occupant/login", post(auth::occupant_login))
}

fn protected_auth_routes() -> Router {
    use axum::routing::post;
    use handlers::protected::auth;

    Router::new()
        .route("/api/auth/change-password", post(auth::change_password))
        .route("/api/auth/verify", get(auth::verify_token))
        .layer(from_fn(middleware::auth::jwt_auth))
}

fn admin_routes() -> Router {
    use axum::routing::{post, put};
    use handlers::protected::admin;

    Router::new()
        .route("/api/admin/dashboard", get(admin::dashboard))
        .route(
            "/api/admin/properties/type/:ptype",
            get(admin::list_properties_by_type),
        )
        .route("/api/admin/properties", post(admin::create_property))
        .route(
            "/api/admin/properties/:property_id",
            get(admin::property_details),
        )
        .route(
            "/api/admin/properties/:property_id/occupant",
            put(admin::update_occupant),
        )
        .route(
            "/api/admin/properties/:property_id/reset-password",
            post(admin::reset_occupant_password),
        )
        .layer(from_fn(middleware::auth::require_admin))
        .layer(from_fn(middleware::auth::jwt_auth))
}

/// Admin account management validates credentials in the handlers: the
/// first admin is created with the system token, before any JWT exists.
fn admin_management_routes() -> Router {
    use axum::routing::{post, put};
    use handlers::protected::admin;

    Router::new()
        .route(
            "/api/admin/admins",
            post(admin::create_admin).get(admin::list_admins),
        )
        .route(
            "/api/admin/admins/:admin_id/status",
            put(admin::update_admin_status),
        )
}

fn occupant_routes() -> Router {
    use handlers::protected::occupant;

    Router::new()
        .route("/api/occupant/dashboard", get(occupant::dashboard))
        .route("/api/occupant/property", get(occupant::property_info))
        .layer(from_fn(middleware::auth::require_occupant))
        .layer(from_fn(middleware::auth::jwt_auth))
}

fn file_routes() -> Router {
    use axum::routing::{delete, post};
    use handlers::protected::files;

    Router::new()
        .route("/api/files/upload", post(files::upload_file))
        .route("/api/files/property/:property_id", get(files::property_files))
        .route("/api/files/occupant/:occupant_id", get(files::occupant_files))
        .route("/api/files/download/:file_id", get(files::download_file))
        .route("/api/files/:file_id", delete(files::delete_file))
        .layer(from_fn(middleware::auth::jwt_auth))
}

fn communication_routes() -> Router {
    use axum::routing::{delete, patch, post};
    use handlers::protected::communications;

    // Only admins may send
    let send = Router::new()
        .route(
            "/api/communications/individual",
            post(communications::send_individual),
        )
        .route("/api/communications/bulk", post(communications::send_bulk))
        .layer(from_fn(middleware::auth::require_admin));

    send.route(
        "/api/communications/property/:property_id",
        get(communications::property_communications),
    )
    .route(
        "/api/communications/occupant/:occupant_id",
        get(communications::occupant_communications),
    )
    .route(
        "/api/communications/:communication_id/read",
        patch(communications::mark_read),
    )
    .route(
        "/api/communications/:communication_id",
        delete(communications::delete_communication),
    )
    .route(
        "/api/communications/download/:communication_id",
        get(communications::download_communication),
    )
    .layer(from_fn(middleware::auth::jwt_auth))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "NithShop API",
            "version": version,
            "description": "Property and occupant management portal backend",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/api/auth/* (login public, rest protected)",
                "admin": "/api/admin/* (admin)",
                "occupant": "/api/occupant/* (occupant)",
                "files": "/api/files/* (protected)",
                "communications": "/api/communications/* (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
