use crate::{
    auth::{AdminUser, AuthUser},
    config::config_model::DotEnvyConfig,
    usecases::orders::OrderUseCase,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use crates::{
    domain::value_objects::{
        orders::{OrderStatusModel, PlaceOrderRequest},
        payments::ConfirmPaymentModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            availability::TableAvailabilityPostgres, dishes::DishPostgres, orders::OrderPostgres,
            payments::PaymentPostgres, session_carts::SessionCartPostgres,
        },
    },
};
use std::sync::Arc;
use uuid::Uuid;

type Orders = OrderUseCase<
    OrderPostgres,
    SessionCartPostgres,
    DishPostgres,
    TableAvailabilityPostgres,
    PaymentPostgres,
>;

fn usecase(db_pool: Arc<PgPoolSquad>, config: &DotEnvyConfig) -> Arc<Orders> {
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let cart_repository = SessionCartPostgres::new(Arc::clone(&db_pool));
    let dish_repository = DishPostgres::new(Arc::clone(&db_pool));
    let availability_repository = TableAvailabilityPostgres::new(Arc::clone(&db_pool));
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));

    Arc::new(OrderUseCase::new(
        Arc::new(order_repository),
        Arc::new(cart_repository),
        Arc::new(dish_repository),
        Arc::new(availability_repository),
        Arc::new(payment_repository),
        config.bank_qr.clone(),
    ))
}

pub fn routes(db_pool: Arc<PgPoolSquad>, config: &DotEnvyConfig) -> Router {
    Router::new()
        .route("/", get(my_orders).post(place_order))
        .route("/:order_id", get(my_order))
        .with_state(usecase(db_pool, config))
}

pub fn payment_routes(db_pool: Arc<PgPoolSquad>, config: &DotEnvyConfig) -> Router {
    Router::new()
        .route("/:order_id", get(payment_page))
        .route("/:order_id/confirm", post(confirm_payment))
        .with_state(usecase(db_pool, config))
}

pub fn admin_routes(db_pool: Arc<PgPoolSquad>, config: &DotEnvyConfig) -> Router {
    Router::new()
        .route("/", get(list_orders))
        .route("/:order_id", get(order_detail).delete(delete_order))
        .route("/:order_id/status", patch(update_order_status))
        .route("/:order_id/complete-cod", post(complete_cod))
        .with_state(usecase(db_pool, config))
}

pub async fn place_order(
    State(order_usecase): State<Arc<Orders>>,
    auth: AuthUser,
    Json(request): Json<PlaceOrderRequest>,
) -> impl IntoResponse {
    match order_usecase
        .place(auth.user_id, auth.session_id, request)
        .await
    {
        Ok(placed) => (StatusCode::CREATED, Json(placed)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn my_orders(
    State(order_usecase): State<Arc<Orders>>,
    auth: AuthUser,
) -> impl IntoResponse {
    match order_usecase.list_for_user(auth.user_id).await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn my_order(
    State(order_usecase): State<Arc<Orders>>,
    auth: AuthUser,
    Path(order_id): Path<Uuid>,
) -> impl IntoResponse {
    match order_usecase.detail_for_user(auth.user_id, order_id).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn payment_page(
    State(order_usecase): State<Arc<Orders>>,
    auth: AuthUser,
    Path(order_id): Path<Uuid>,
) -> impl IntoResponse {
    match order_usecase.payment_page(auth.user_id, order_id).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn confirm_payment(
    State(order_usecase): State<Arc<Orders>>,
    auth: AuthUser,
    Path(order_id): Path<Uuid>,
    Json(model): Json<ConfirmPaymentModel>,
) -> impl IntoResponse {
    match order_usecase
        .confirm_payment(auth.user_id, order_id, model)
        .await
    {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_orders(
    State(order_usecase): State<Arc<Orders>>,
    _admin: AdminUser,
) -> impl IntoResponse {
    match order_usecase.list_all().await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn order_detail(
    State(order_usecase): State<Arc<Orders>>,
    _admin: AdminUser,
    Path(order_id): Path<Uuid>,
) -> impl IntoResponse {
    match order_usecase.detail(order_id).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_order_status(
    State(order_usecase): State<Arc<Orders>>,
    _admin: AdminUser,
    Path(order_id): Path<Uuid>,
    Json(model): Json<OrderStatusModel>,
) -> impl IntoResponse {
    match order_usecase.update_status(order_id, model.status).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

/// Marks a cash on delivery order as collected and completed.
pub async fn complete_cod(
    State(order_usecase): State<Arc<Orders>>,
    _admin: AdminUser,
    Path(order_id): Path<Uuid>,
) -> impl IntoResponse {
    match order_usecase.complete_cod(order_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_order(
    State(order_usecase): State<Arc<Orders>>,
    _admin: AdminUser,
    Path(order_id): Path<Uuid>,
) -> impl IntoResponse {
    match order_usecase.delete(order_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
