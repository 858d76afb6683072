//src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod clients;
mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Config};
use crate::middleware::auth::auth_guard;

// Photos straight from a phone camera
const MEDIA_BODY_LIMIT: usize = 25 * 1024 * 1024;

fn router(app_state: AppState) -> Router {
    let session_routes = Router::new()
        .route("/"
               ,get(handlers::session::get_session)
               .delete(handlers::session::end_session)
        )
        .route("/refresh", post(handlers::session::refresh_session));

    let location_routes = Router::new()
        .route("/locations", get(handlers::locations::list_locations))
        .route("/location", get(handlers::locations::get_location))
        .route("/location/select", post(handlers::locations::select_location));

    let customer_routes = Router::new()
        .route("/", get(handlers::customers::list_customers))
        .route("/{customer_id}"
               ,get(handlers::customers::get_customer)
               .patch(handlers::customers::update_customer)
        )
        .route("/{customer_id}/notes", post(handlers::customers::add_note))
        .route("/{customer_id}/appointments", post(handlers::customers::schedule_appointment))
        .route("/{customer_id}/envelopes", get(handlers::customers::list_envelopes));

    let job_routes = Router::new()
        .route("/{job_id}", get(handlers::jobs::get_job))
        .route("/{job_id}/status", patch(handlers::jobs::update_job_status))
        .route("/{job_id}/media"
               ,post(handlers::jobs::upload_media)
               .layer(DefaultBodyLimit::max(MEDIA_BODY_LIMIT))
        );

    let dashboard_routes = Router::new()
        .route("/leaderboard", get(handlers::dashboard::get_leaderboard))
        .route("/installers", get(handlers::dashboard::get_installer_dashboard));

    // Everything under /api except the health check needs a session
    let protected = Router::new()
        .nest("/session", session_routes)
        .merge(location_routes)
        .nest("/customers", customer_routes)
        .nest("/jobs", job_routes)
        .nest("/dashboard", dashboard_routes)
        .route("/bids/{bid_id}/checklist", get(handlers::dashboard::get_bid_checklist))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", protected)
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;
    let app_state = AppState::new(&config).await?;

    if config.run_migrations {
        sqlx::migrate!().run(&app_state.db_pool).await?;
        tracing::info!("✅ Database migrations applied");
    }

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(app_state)).await?;
    Ok(())
}
