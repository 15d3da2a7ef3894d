use crate::{auth::AdminUser, usecases::dishes::DishUseCase};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use crates::{
    domain::{
        repositories::dishes::DishRepository,
        value_objects::dishes::{DishFilter, DishModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::dishes::DishPostgres,
    },
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

fn usecase(db_pool: Arc<PgPoolSquad>) -> Arc<DishUseCase<DishPostgres>> {
    Arc::new(DishUseCase::new(Arc::new(DishPostgres::new(db_pool))))
}

/// `/menu` and `/dishes/:id`.
pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    Router::new()
        .route("/menu", get(list_dishes))
        .route("/dishes/:dish_id", get(get_dish))
        .with_state(usecase(db_pool))
}

pub fn admin_routes(db_pool: Arc<PgPoolSquad>) -> Router {
    Router::new()
        .route("/", get(admin_list_dishes).post(create_dish))
        .route(
            "/:dish_id",
            get(admin_get_dish).put(update_dish).delete(delete_dish),
        )
        .with_state(usecase(db_pool))
}

pub async fn list_dishes<T>(
    State(dish_usecase): State<Arc<DishUseCase<T>>>,
    Query(filter): Query<DishFilter>,
) -> impl IntoResponse
where
    T: DishRepository + Send + Sync,
{
    match dish_usecase.list(filter).await {
        Ok(dishes) => (StatusCode::OK, Json(dishes)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_dish<T>(
    State(dish_usecase): State<Arc<DishUseCase<T>>>,
    Path(dish_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: DishRepository + Send + Sync,
{
    match dish_usecase.get(dish_id).await {
        Ok(dish) => (StatusCode::OK, Json(dish)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn admin_list_dishes<T>(
    state: State<Arc<DishUseCase<T>>>,
    _admin: AdminUser,
    filter: Query<DishFilter>,
) -> impl IntoResponse
where
    T: DishRepository + Send + Sync,
{
    list_dishes(state, filter).await
}

pub async fn admin_get_dish<T>(
    state: State<Arc<DishUseCase<T>>>,
    _admin: AdminUser,
    dish_id: Path<Uuid>,
) -> impl IntoResponse
where
    T: DishRepository + Send + Sync,
{
    get_dish(state, dish_id).await
}

pub async fn create_dish<T>(
    State(dish_usecase): State<Arc<DishUseCase<T>>>,
    _admin: AdminUser,
    Json(model): Json<DishModel>,
) -> impl IntoResponse
where
    T: DishRepository + Send + Sync,
{
    match dish_usecase.create(model).await {
        Ok(dish_id) => (StatusCode::CREATED, Json(json!({ "id": dish_id }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_dish<T>(
    State(dish_usecase): State<Arc<DishUseCase<T>>>,
    _admin: AdminUser,
    Path(dish_id): Path<Uuid>,
    Json(model): Json<DishModel>,
) -> impl IntoResponse
where
    T: DishRepository + Send + Sync,
{
    match dish_usecase.update(dish_id, model).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_dish<T>(
    State(dish_usecase): State<Arc<DishUseCase<T>>>,
    _admin: AdminUser,
    Path(dish_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: DishRepository + Send + Sync,
{
    match dish_usecase.delete(dish_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
