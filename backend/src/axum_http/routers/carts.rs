use crate::{auth::AuthUser, usecases::carts::CartUseCase};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use crates::{
    domain::{
        repositories::{
            branches::BranchRepository, dishes::DishRepository,
            session_carts::SessionCartRepository,
        },
        value_objects::carts::AddToCartModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            branches::BranchPostgres, dishes::DishPostgres, session_carts::SessionCartPostgres,
        },
    },
};
use std::sync::Arc;
use uuid::Uuid;

/// The cart belongs to the login session, so every route needs a session token.
pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let cart_repository = SessionCartPostgres::new(Arc::clone(&db_pool));
    let dish_repository = DishPostgres::new(Arc::clone(&db_pool));
    let branch_repository = BranchPostgres::new(Arc::clone(&db_pool));
    let cart_usecase = CartUseCase::new(
        Arc::new(cart_repository),
        Arc::new(dish_repository),
        Arc::new(branch_repository),
    );

    Router::new()
        .route("/cart", get(view_cart))
        .route("/cart/items", post(add_to_cart))
        .route("/cart/items/:dish_id", delete(remove_from_cart))
        .route("/checkout", get(checkout_summary))
        .with_state(Arc::new(cart_usecase))
}

pub async fn view_cart<S, D, B>(
    State(cart_usecase): State<Arc<CartUseCase<S, D, B>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: SessionCartRepository + Send + Sync,
    D: DishRepository + Send + Sync,
    B: BranchRepository + Send + Sync,
{
    match cart_usecase.view(auth.session_id).await {
        Ok(cart) => (StatusCode::OK, Json(cart)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn add_to_cart<S, D, B>(
    State(cart_usecase): State<Arc<CartUseCase<S, D, B>>>,
    auth: AuthUser,
    Json(model): Json<AddToCartModel>,
) -> impl IntoResponse
where
    S: SessionCartRepository + Send + Sync,
    D: DishRepository + Send + Sync,
    B: BranchRepository + Send + Sync,
{
    match cart_usecase.add(auth.session_id, auth.user_id, model).await {
        Ok(cart) => (StatusCode::OK, Json(cart)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn remove_from_cart<S, D, B>(
    State(cart_usecase): State<Arc<CartUseCase<S, D, B>>>,
    auth: AuthUser,
    Path(dish_id): Path<Uuid>,
) -> impl IntoResponse
where
    S: SessionCartRepository + Send + Sync,
    D: DishRepository + Send + Sync,
    B: BranchRepository + Send + Sync,
{
    match cart_usecase
        .remove(auth.session_id, auth.user_id, dish_id)
        .await
    {
        Ok(cart) => (StatusCode::OK, Json(cart)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn checkout_summary<S, D, B>(
    State(cart_usecase): State<Arc<CartUseCase<S, D, B>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: SessionCartRepository + Send + Sync,
    D: DishRepository + Send + Sync,
    B: BranchRepository + Send + Sync,
{
    match cart_usecase.checkout_summary(auth.session_id).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => err.into_response(),
    }
}
