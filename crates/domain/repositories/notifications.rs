use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::notifications::NotificationEntity,
    value_objects::enums::notification_statuses::NotificationStatus,
};

#[async_trait]
#[automock]
pub trait NotificationRepository {
    async fn list_pending(&self) -> Result<Vec<NotificationEntity>>;
    async fn find_by_id(&self, notification_id: Uuid) -> Result<Option<NotificationEntity>>;
    async fn update_status(
        &self,
        notification_id: Uuid,
        expected: NotificationStatus,
        next: NotificationStatus,
    ) -> Result<usize>;
}
