use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payments::PaymentEntity;

#[async_trait]
#[automock]
pub trait PaymentRepository {
    async fn find_by_order(&self, order_id: Uuid) -> Result<Option<PaymentEntity>>;
    async fn find_by_reservation(&self, reservation_id: Uuid) -> Result<Option<PaymentEntity>>;
}
