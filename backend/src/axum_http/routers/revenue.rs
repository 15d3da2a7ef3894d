use crate::{auth::AdminUser, usecases::revenue::RevenueUseCase};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use crates::{
    domain::{repositories::revenue::RevenueRepository, value_objects::revenue::RevenueQuery},
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::revenue::RevenuePostgres,
    },
};
use std::sync::Arc;

pub fn admin_routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let revenue_repository = RevenuePostgres::new(Arc::clone(&db_pool));
    let revenue_usecase = RevenueUseCase::new(Arc::new(revenue_repository));

    Router::new()
        .route("/", get(report))
        .with_state(Arc::new(revenue_usecase))
}

/// `?year=2025` for a monthly breakdown of that year, `?year=2025&month=3` for one month,
/// nothing for the current year.
pub async fn report<T>(
    State(revenue_usecase): State<Arc<RevenueUseCase<T>>>,
    _admin: AdminUser,
    Query(query): Query<RevenueQuery>,
) -> impl IntoResponse
where
    T: RevenueRepository + Send + Sync,
{
    match revenue_usecase.report(query, Utc::now()).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => err.into_response(),
    }
}
