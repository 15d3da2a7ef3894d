use crate::{auth::AdminUser, usecases::blogs::BlogUseCase};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use crates::{
    domain::{
        entities::blogs::BlogEntity, repositories::blogs::BlogRepository,
        value_objects::blogs::BlogModel,
    },
    infra::db::{postgres::postgres_connection::PgPoolSquad, repositories::blogs::BlogPostgres},
};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

fn blog_body(blog: BlogEntity) -> Value {
    json!({
        "id": blog.id,
        "title": blog.title,
        "content": blog.content,
        "image": blog.image,
        "author": blog.author,
        "created_at": blog.created_at,
        "updated_at": blog.updated_at,
    })
}

fn usecase(db_pool: Arc<PgPoolSquad>) -> Arc<BlogUseCase<BlogPostgres>> {
    Arc::new(BlogUseCase::new(Arc::new(BlogPostgres::new(db_pool))))
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    Router::new()
        .route("/", get(list_blogs))
        .route("/:blog_id", get(get_blog))
        .with_state(usecase(db_pool))
}

pub fn admin_routes(db_pool: Arc<PgPoolSquad>) -> Router {
    Router::new()
        .route("/", post(create_blog))
        .route("/:blog_id", put(update_blog).delete(delete_blog))
        .with_state(usecase(db_pool))
}

pub async fn list_blogs<T>(State(blog_usecase): State<Arc<BlogUseCase<T>>>) -> impl IntoResponse
where
    T: BlogRepository + Send + Sync,
{
    match blog_usecase.list().await {
        Ok(blogs) => {
            let body: Vec<_> = blogs
                .into_iter()
                .map(blog_body)
                .collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_blog<T>(
    State(blog_usecase): State<Arc<BlogUseCase<T>>>,
    Path(blog_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: BlogRepository + Send + Sync,
{
    match blog_usecase.get(blog_id).await {
        Ok(blog) => (
            StatusCode::OK,
            Json(blog_body(blog)),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_blog<T>(
    State(blog_usecase): State<Arc<BlogUseCase<T>>>,
    _admin: AdminUser,
    Json(model): Json<BlogModel>,
) -> impl IntoResponse
where
    T: BlogRepository + Send + Sync,
{
    match blog_usecase.create(model).await {
        Ok(blog_id) => (StatusCode::CREATED, Json(json!({ "id": blog_id }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_blog<T>(
    State(blog_usecase): State<Arc<BlogUseCase<T>>>,
    _admin: AdminUser,
    Path(blog_id): Path<Uuid>,
    Json(model): Json<BlogModel>,
) -> impl IntoResponse
where
    T: BlogRepository + Send + Sync,
{
    match blog_usecase.update(blog_id, model).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_blog<T>(
    State(blog_usecase): State<Arc<BlogUseCase<T>>>,
    _admin: AdminUser,
    Path(blog_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: BlogRepository + Send + Sync,
{
    match blog_usecase.delete(blog_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
