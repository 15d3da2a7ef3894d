use crate::{
    auth::{AdminUser, AuthUser},
    config::config_model::DotEnvyConfig,
    usecases::reservations::ReservationUseCase,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::Utc;
use crates::{
    domain::value_objects::{
        payments::ConfirmPaymentModel,
        reservations::{PlaceReservationRequest, ReservationStatusModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            availability::TableAvailabilityPostgres, dishes::DishPostgres,
            payments::PaymentPostgres, reservations::ReservationPostgres,
        },
    },
};
use std::sync::Arc;
use uuid::Uuid;

type Reservations = ReservationUseCase<
    ReservationPostgres,
    DishPostgres,
    TableAvailabilityPostgres,
    PaymentPostgres,
>;

fn usecase(db_pool: Arc<PgPoolSquad>, config: &DotEnvyConfig) -> Arc<Reservations> {
    let reservation_repository = ReservationPostgres::new(Arc::clone(&db_pool));
    let dish_repository = DishPostgres::new(Arc::clone(&db_pool));
    let availability_repository = TableAvailabilityPostgres::new(Arc::clone(&db_pool));
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));

    Arc::new(ReservationUseCase::new(
        Arc::new(reservation_repository),
        Arc::new(dish_repository),
        Arc::new(availability_repository),
        Arc::new(payment_repository),
        config.bank_qr.clone(),
    ))
}

pub fn routes(db_pool: Arc<PgPoolSquad>, config: &DotEnvyConfig) -> Router {
    Router::new()
        .route("/", get(my_reservations).post(place_reservation))
        .route("/:reservation_id", get(my_reservation))
        .with_state(usecase(db_pool, config))
}

pub fn payment_routes(db_pool: Arc<PgPoolSquad>, config: &DotEnvyConfig) -> Router {
    Router::new()
        .route("/:reservation_id", get(payment_page))
        .route("/:reservation_id/confirm", post(confirm_payment))
        .with_state(usecase(db_pool, config))
}

pub fn admin_routes(db_pool: Arc<PgPoolSquad>, config: &DotEnvyConfig) -> Router {
    Router::new()
        .route("/", get(list_reservations))
        .route(
            "/:reservation_id",
            get(reservation_detail).delete(delete_reservation),
        )
        .route("/:reservation_id/status", patch(update_reservation_status))
        .with_state(usecase(db_pool, config))
}

pub async fn place_reservation(
    State(reservation_usecase): State<Arc<Reservations>>,
    auth: AuthUser,
    Json(request): Json<PlaceReservationRequest>,
) -> impl IntoResponse {
    match reservation_usecase
        .place(auth.user_id, request, Utc::now())
        .await
    {
        Ok(placed) => (StatusCode::CREATED, Json(placed)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn my_reservations(
    State(reservation_usecase): State<Arc<Reservations>>,
    auth: AuthUser,
) -> impl IntoResponse {
    match reservation_usecase.list_for_user(auth.user_id).await {
        Ok(reservations) => (StatusCode::OK, Json(reservations)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn my_reservation(
    State(reservation_usecase): State<Arc<Reservations>>,
    auth: AuthUser,
    Path(reservation_id): Path<Uuid>,
) -> impl IntoResponse {
    match reservation_usecase
        .detail_for_user(auth.user_id, reservation_id)
        .await
    {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn payment_page(
    State(reservation_usecase): State<Arc<Reservations>>,
    auth: AuthUser,
    Path(reservation_id): Path<Uuid>,
) -> impl IntoResponse {
    match reservation_usecase
        .payment_page(auth.user_id, reservation_id)
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn confirm_payment(
    State(reservation_usecase): State<Arc<Reservations>>,
    auth: AuthUser,
    Path(reservation_id): Path<Uuid>,
    Json(model): Json<ConfirmPaymentModel>,
) -> impl IntoResponse {
    match reservation_usecase
        .confirm_payment(auth.user_id, reservation_id, model)
        .await
    {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_reservations(
    State(reservation_usecase): State<Arc<Reservations>>,
    _admin: AdminUser,
) -> impl IntoResponse {
    match reservation_usecase.list_all().await {
        Ok(reservations) => (StatusCode::OK, Json(reservations)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn reservation_detail(
    State(reservation_usecase): State<Arc<Reservations>>,
    _admin: AdminUser,
    Path(reservation_id): Path<Uuid>,
) -> impl IntoResponse {
    match reservation_usecase.detail(reservation_id).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_reservation_status(
    State(reservation_usecase): State<Arc<Reservations>>,
    _admin: AdminUser,
    Path(reservation_id): Path<Uuid>,
    Json(model): Json<ReservationStatusModel>,
) -> impl IntoResponse {
    match reservation_usecase
        .update_status(reservation_id, model.status)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_reservation(
    State(reservation_usecase): State<Arc<Reservations>>,
    _admin: AdminUser,
    Path(reservation_id): Path<Uuid>,
) -> impl IntoResponse {
    match reservation_usecase.delete(reservation_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
