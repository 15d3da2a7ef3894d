use std::sync::Arc;

use axum::http::StatusCode;
use crates::domain::{
    entities::blogs::BlogEntity, repositories::blogs::BlogRepository,
    value_objects::blogs::BlogModel,
};
use tracing::{info, warn};
use uuid::Uuid;

use super::errors::{RestaurantError, UseCaseResult, storage_failure};

pub struct BlogUseCase<B>
where
    B: BlogRepository + Send + Sync + 'static,
{
    blog_repo: Arc<B>,
}

impl<B> BlogUseCase<B>
where
    B: BlogRepository + Send + Sync + 'static,
{
    pub fn new(blog_repo: Arc<B>) -> Self {
        Self { blog_repo }
    }

    pub async fn list(&self) -> UseCaseResult<Vec<BlogEntity>> {
        self.blog_repo
            .list()
            .await
            .map_err(storage_failure("blogs: failed to list posts"))
    }

    pub async fn get(&self, blog_id: Uuid) -> UseCaseResult<BlogEntity> {
        self.blog_repo
            .find_by_id(blog_id)
            .await
            .map_err(storage_failure("blogs: failed to load post"))?
            .ok_or(RestaurantError::NotFound("blog"))
    }

    pub async fn create(&self, model: BlogModel) -> UseCaseResult<Uuid> {
        let entity = model.to_insert_entity().map_err(|err| {
            warn!(status = StatusCode::BAD_REQUEST.as_u16(), reason = %err, "blogs: rejected post");
            RestaurantError::validation(err)
        })?;

        let blog_id = self
            .blog_repo
            .create(entity)
            .await
            .map_err(storage_failure("blogs: failed to create post"))?;
        info!(%blog_id, "blogs: post created");
        Ok(blog_id)
    }

    pub async fn update(&self, blog_id: Uuid, model: BlogModel) -> UseCaseResult<()> {
        let entity = model.to_edit_entity().map_err(|err| {
            warn!(%blog_id, status = StatusCode::BAD_REQUEST.as_u16(), reason = %err, "blogs: rejected post update");
            RestaurantError::validation(err)
        })?;

        let updated = self
            .blog_repo
            .update(blog_id, entity)
            .await
            .map_err(storage_failure("blogs: failed to update post"))?;
        if updated == 0 {
            return Err(RestaurantError::NotFound("blog"));
        }
        Ok(())
    }

    pub async fn delete(&self, blog_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .blog_repo
            .delete(blog_id)
            .await
            .map_err(storage_failure("blogs: failed to delete post"))?;
        if deleted == 0 {
            return Err(RestaurantError::NotFound("blog"));
        }
        info!(%blog_id, "blogs: post deleted");
        Ok(())
    }
}
