use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::blogs::{BlogEntity, EditBlogEntity, InsertBlogEntity};

#[async_trait]
#[automock]
pub trait BlogRepository {
    async fn list(&self) -> Result<Vec<BlogEntity>>;
    async fn find_by_id(&self, blog_id: Uuid) -> Result<Option<BlogEntity>>;
    async fn create(&self, insert_blog_entity: InsertBlogEntity) -> Result<Uuid>;
    async fn update(&self, blog_id: Uuid, edit_blog_entity: EditBlogEntity) -> Result<usize>;
    async fn delete(&self, blog_id: Uuid) -> Result<usize>;
}
