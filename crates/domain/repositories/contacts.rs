use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::contacts::{ContactEntity, InsertContactEntity};

#[async_trait]
#[automock]
pub trait ContactRepository {
    async fn list(&self) -> Result<Vec<ContactEntity>>;
    async fn create(&self, insert_contact_entity: InsertContactEntity) -> Result<Uuid>;
    async fn update_status(&self, contact_id: Uuid, status: String) -> Result<usize>;
    async fn delete(&self, contact_id: Uuid) -> Result<usize>;
}
