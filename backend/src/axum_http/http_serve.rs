use crate::{
    axum_http::{default_routers, routers},
    config::config_model::DotEnvyConfig,
};
use anyhow::Result;
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use crates::infra::db::postgres::postgres_connection::PgPoolSquad;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

pub fn api(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Router {
    let public = Router::new()
        .merge(routers::dishes::routes(Arc::clone(&db_pool)))
        .nest("/branches", routers::branches::routes(Arc::clone(&db_pool)))
        .nest("/events", routers::events::routes(Arc::clone(&db_pool)))
        .nest("/blogs", routers::blogs::routes(Arc::clone(&db_pool)))
        .nest("/contacts", routers::contacts::routes(Arc::clone(&db_pool)));

    let customer = Router::new()
        .merge(routers::carts::routes(Arc::clone(&db_pool)))
        .nest(
            "/orders",
            routers::orders::routes(Arc::clone(&db_pool), &config),
        )
        .nest(
            "/reservations",
            routers::reservations::routes(Arc::clone(&db_pool), &config),
        )
        .nest(
            "/payments/orders",
            routers::orders::payment_routes(Arc::clone(&db_pool), &config),
        )
        .nest(
            "/payments/reservations",
            routers::reservations::payment_routes(Arc::clone(&db_pool), &config),
        );

    let admin = Router::new()
        .nest("/dishes", routers::dishes::admin_routes(Arc::clone(&db_pool)))
        .nest("/branches", routers::branches::admin_routes(Arc::clone(&db_pool)))
        .nest("/events", routers::events::admin_routes(Arc::clone(&db_pool)))
        .nest("/blogs", routers::blogs::admin_routes(Arc::clone(&db_pool)))
        .nest("/contacts", routers::contacts::admin_routes(Arc::clone(&db_pool)))
        .nest(
            "/orders",
            routers::orders::admin_routes(Arc::clone(&db_pool), &config),
        )
        .nest(
            "/reservations",
            routers::reservations::admin_routes(Arc::clone(&db_pool), &config),
        )
        .nest(
            "/notifications",
            routers::notifications::admin_routes(Arc::clone(&db_pool)),
        )
        .nest("/revenue", routers::revenue::admin_routes(Arc::clone(&db_pool)));

    Router::new()
        .merge(public)
        .merge(customer)
        .nest("/admin", admin)
        .route("/health-check", get(default_routers::health_check))
}

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest("/api/v1", api(Arc::clone(&config), db_pool))
        .layer(TimeoutLayer::new(Duration::from_secs(config.server.timeout)))
        .layer(RequestBodyLimitLayer::new(
            (config.server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
