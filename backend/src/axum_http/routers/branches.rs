use crate::{
    auth::AdminUser,
    usecases::{availability::AvailabilityUseCase, branches::BranchUseCase},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;
use crates::{
    domain::{
        repositories::{
            availability::TableAvailabilityRepository, branches::BranchRepository,
            events::EventRepository,
        },
        value_objects::branches::BranchModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            availability::TableAvailabilityPostgres, branches::BranchPostgres,
            events::EventPostgres,
        },
    },
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

fn usecase(db_pool: Arc<PgPoolSquad>) -> Arc<BranchUseCase<BranchPostgres, EventPostgres>> {
    let branch_repository = BranchPostgres::new(Arc::clone(&db_pool));
    let event_repository = EventPostgres::new(Arc::clone(&db_pool));
    Arc::new(BranchUseCase::new(
        Arc::new(branch_repository),
        Arc::new(event_repository),
    ))
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    Router::new()
        .route("/", get(list_branches))
        .route("/:branch_id", get(branch_detail))
        .with_state(usecase(db_pool))
}

/// Branch CRUD plus manual table adjustments.
pub fn admin_routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let availability_repository = TableAvailabilityPostgres::new(Arc::clone(&db_pool));
    let availability_usecase = AvailabilityUseCase::new(Arc::new(availability_repository));

    let tables = Router::new()
        .route("/:branch_id/tables", get(table_counts))
        .route("/:branch_id/tables/add", post(add_table))
        .route("/:branch_id/tables/remove", post(remove_table))
        .with_state(Arc::new(availability_usecase));

    Router::new()
        .route("/", get(admin_list_branches).post(create_branch))
        .route("/:branch_id", put(update_branch).delete(delete_branch))
        .with_state(usecase(db_pool))
        .merge(tables)
}

pub async fn list_branches<B, E>(
    State(branch_usecase): State<Arc<BranchUseCase<B, E>>>,
) -> impl IntoResponse
where
    B: BranchRepository + Send + Sync,
    E: EventRepository + Send + Sync,
{
    match branch_usecase.list().await {
        Ok(branches) => (StatusCode::OK, Json(branches)).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Branch with its gallery, menu and the promotions running there right now.
pub async fn branch_detail<B, E>(
    State(branch_usecase): State<Arc<BranchUseCase<B, E>>>,
    Path(branch_id): Path<Uuid>,
) -> impl IntoResponse
where
    B: BranchRepository + Send + Sync,
    E: EventRepository + Send + Sync,
{
    match branch_usecase.detail(branch_id, Utc::now()).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn admin_list_branches<B, E>(
    state: State<Arc<BranchUseCase<B, E>>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    B: BranchRepository + Send + Sync,
    E: EventRepository + Send + Sync,
{
    list_branches(state).await
}

pub async fn create_branch<B, E>(
    State(branch_usecase): State<Arc<BranchUseCase<B, E>>>,
    _admin: AdminUser,
    Json(model): Json<BranchModel>,
) -> impl IntoResponse
where
    B: BranchRepository + Send + Sync,
    E: EventRepository + Send + Sync,
{
    match branch_usecase.create(model).await {
        Ok(branch_id) => (StatusCode::CREATED, Json(json!({ "id": branch_id }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_branch<B, E>(
    State(branch_usecase): State<Arc<BranchUseCase<B, E>>>,
    _admin: AdminUser,
    Path(branch_id): Path<Uuid>,
    Json(model): Json<BranchModel>,
) -> impl IntoResponse
where
    B: BranchRepository + Send + Sync,
    E: EventRepository + Send + Sync,
{
    match branch_usecase.update(branch_id, model).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_branch<B, E>(
    State(branch_usecase): State<Arc<BranchUseCase<B, E>>>,
    _admin: AdminUser,
    Path(branch_id): Path<Uuid>,
) -> impl IntoResponse
where
    B: BranchRepository + Send + Sync,
    E: EventRepository + Send + Sync,
{
    match branch_usecase.delete(branch_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn table_counts<T>(
    State(availability_usecase): State<Arc<AvailabilityUseCase<T>>>,
    _admin: AdminUser,
    Path(branch_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: TableAvailabilityRepository + Send + Sync,
{
    match availability_usecase.counts(branch_id).await {
        Ok(counts) => (StatusCode::OK, Json(counts)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn add_table<T>(
    State(availability_usecase): State<Arc<AvailabilityUseCase<T>>>,
    _admin: AdminUser,
    Path(branch_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: TableAvailabilityRepository + Send + Sync,
{
    match availability_usecase.add_table_slot(branch_id).await {
        Ok(counts) => (StatusCode::OK, Json(counts)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn remove_table<T>(
    State(availability_usecase): State<Arc<AvailabilityUseCase<T>>>,
    _admin: AdminUser,
    Path(branch_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: TableAvailabilityRepository + Send + Sync,
{
    match availability_usecase.remove_table_slot(branch_id).await {
        Ok(counts) => (StatusCode::OK, Json(counts)).into_response(),
        Err(err) => err.into_response(),
    }
}
