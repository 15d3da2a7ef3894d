use crate::{auth::AdminUser, usecases::contacts::ContactUseCase};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use crates::{
    domain::{
        repositories::contacts::ContactRepository,
        value_objects::contacts::{ContactModel, ContactStatusModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::contacts::ContactPostgres,
    },
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

fn usecase(db_pool: Arc<PgPoolSquad>) -> Arc<ContactUseCase<ContactPostgres>> {
    Arc::new(ContactUseCase::new(Arc::new(ContactPostgres::new(db_pool))))
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    Router::new()
        .route("/", post(submit_contact))
        .with_state(usecase(db_pool))
}

pub fn admin_routes(db_pool: Arc<PgPoolSquad>) -> Router {
    Router::new()
        .route("/", get(list_contacts))
        .route("/:contact_id/status", patch(update_contact_status))
        .route("/:contact_id", delete(delete_contact))
        .with_state(usecase(db_pool))
}

pub async fn submit_contact<T>(
    State(contact_usecase): State<Arc<ContactUseCase<T>>>,
    Json(model): Json<ContactModel>,
) -> impl IntoResponse
where
    T: ContactRepository + Send + Sync,
{
    match contact_usecase.submit(model).await {
        Ok(contact_id) => (StatusCode::CREATED, Json(json!({ "id": contact_id }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_contacts<T>(
    State(contact_usecase): State<Arc<ContactUseCase<T>>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    T: ContactRepository + Send + Sync,
{
    match contact_usecase.list().await {
        Ok(contacts) => {
            let body: Vec<_> = contacts
                .into_iter()
                .map(|contact| {
                    json!({
                        "id": contact.id,
                        "name": contact.name,
                        "email": contact.email,
                        "message": contact.message,
                        "status": contact.status,
                        "created_at": contact.created_at,
                    })
                })
                .collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_contact_status<T>(
    State(contact_usecase): State<Arc<ContactUseCase<T>>>,
    _admin: AdminUser,
    Path(contact_id): Path<Uuid>,
    Json(model): Json<ContactStatusModel>,
) -> impl IntoResponse
where
    T: ContactRepository + Send + Sync,
{
    match contact_usecase.update_status(contact_id, model).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_contact<T>(
    State(contact_usecase): State<Arc<ContactUseCase<T>>>,
    _admin: AdminUser,
    Path(contact_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: ContactRepository + Send + Sync,
{
    match contact_usecase.delete(contact_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
