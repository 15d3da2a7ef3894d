use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::events::{EditEventEntity, EventEntity, InsertEventEntity};

#[async_trait]
#[automock]
pub trait EventRepository {
    async fn list(&self) -> Result<Vec<EventEntity>>;
    async fn find_by_id(&self, event_id: Uuid) -> Result<Option<EventEntity>>;
    /// Targeted `(branch ids, dish ids)` of an event.
    async fn targets(&self, event_id: Uuid) -> Result<(Vec<Uuid>, Vec<Uuid>)>;
    async fn active_for_branch(&self, branch_id: Uuid, now: DateTime<Utc>) -> Result<Vec<EventEntity>>;
    async fn create(
        &self,
        insert_event_entity: InsertEventEntity,
        branch_ids: Vec<Uuid>,
        dish_ids: Vec<Uuid>,
    ) -> Result<Uuid>;
    async fn update(
        &self,
        event_id: Uuid,
        edit_event_entity: EditEventEntity,
        branch_ids: Vec<Uuid>,
        dish_ids: Vec<Uuid>,
    ) -> Result<usize>;
    async fn delete(&self, event_id: Uuid) -> Result<usize>;
}
