use crate::{auth::AdminUser, usecases::notifications::NotificationUseCase};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use crates::{
    domain::repositories::notifications::NotificationRepository,
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::notifications::NotificationPostgres,
    },
};
use std::sync::Arc;
use uuid::Uuid;

/// Staff notification board, admin only.
pub fn admin_routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let notification_repository = NotificationPostgres::new(Arc::clone(&db_pool));
    let notification_usecase = NotificationUseCase::new(Arc::new(notification_repository));

    Router::new()
        .route("/", get(list_pending))
        .route("/:notification_id/read", post(mark_read))
        .route("/:notification_id/resolve", post(resolve))
        .with_state(Arc::new(notification_usecase))
}

pub async fn list_pending<T>(
    State(notification_usecase): State<Arc<NotificationUseCase<T>>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    T: NotificationRepository + Send + Sync,
{
    match notification_usecase.list_pending().await {
        Ok(notifications) => (StatusCode::OK, Json(notifications)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn mark_read<T>(
    State(notification_usecase): State<Arc<NotificationUseCase<T>>>,
    _admin: AdminUser,
    Path(notification_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: NotificationRepository + Send + Sync,
{
    match notification_usecase.mark_read(notification_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn resolve<T>(
    State(notification_usecase): State<Arc<NotificationUseCase<T>>>,
    _admin: AdminUser,
    Path(notification_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: NotificationRepository + Send + Sync,
{
    match notification_usecase.resolve(notification_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
