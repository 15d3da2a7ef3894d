use crate::{auth::AdminUser, usecases::events::EventUseCase};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use crates::{
    domain::{repositories::events::EventRepository, value_objects::events::EventModel},
    infra::db::{postgres::postgres_connection::PgPoolSquad, repositories::events::EventPostgres},
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

fn usecase(db_pool: Arc<PgPoolSquad>) -> Arc<EventUseCase<EventPostgres>> {
    Arc::new(EventUseCase::new(Arc::new(EventPostgres::new(db_pool))))
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    Router::new()
        .route("/", get(list_active_events))
        .route("/:event_id", get(get_event))
        .with_state(usecase(db_pool))
}

pub fn admin_routes(db_pool: Arc<PgPoolSquad>) -> Router {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:event_id", get(admin_get_event).put(update_event).delete(delete_event))
        .with_state(usecase(db_pool))
}

pub async fn list_active_events<T>(
    State(event_usecase): State<Arc<EventUseCase<T>>>,
) -> impl IntoResponse
where
    T: EventRepository + Send + Sync,
{
    match event_usecase.active(Utc::now()).await {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_event<T>(
    State(event_usecase): State<Arc<EventUseCase<T>>>,
    Path(event_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: EventRepository + Send + Sync,
{
    match event_usecase.get(event_id).await {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_events<T>(
    State(event_usecase): State<Arc<EventUseCase<T>>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    T: EventRepository + Send + Sync,
{
    match event_usecase.list().await {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn admin_get_event<T>(
    state: State<Arc<EventUseCase<T>>>,
    _admin: AdminUser,
    event_id: Path<Uuid>,
) -> impl IntoResponse
where
    T: EventRepository + Send + Sync,
{
    get_event(state, event_id).await
}

pub async fn create_event<T>(
    State(event_usecase): State<Arc<EventUseCase<T>>>,
    _admin: AdminUser,
    Json(model): Json<EventModel>,
) -> impl IntoResponse
where
    T: EventRepository + Send + Sync,
{
    match event_usecase.create(model).await {
        Ok(event_id) => (StatusCode::CREATED, Json(json!({ "id": event_id }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_event<T>(
    State(event_usecase): State<Arc<EventUseCase<T>>>,
    _admin: AdminUser,
    Path(event_id): Path<Uuid>,
    Json(model): Json<EventModel>,
) -> impl IntoResponse
where
    T: EventRepository + Send + Sync,
{
    match event_usecase.update(event_id, model).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_event<T>(
    State(event_usecase): State<Arc<EventUseCase<T>>>,
    _admin: AdminUser,
    Path(event_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: EventRepository + Send + Sync,
{
    match event_usecase.delete(event_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
