use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::orders::{OrderEntity, OrderItemEntity},
    value_objects::{
        availability::{Placement, StatusUpdate},
        enums::order_statuses::OrderStatus,
        orders::OrderDraft,
        payments::OrderSettlement,
    },
};

#[async_trait]
#[automock]
pub trait OrderRepository {
    /// Claims the draft's table (if any), inserts the order, its items and the
    /// escalation notification in one transaction.
    async fn place(&self, draft: OrderDraft) -> Result<Placement<OrderEntity>>;
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderEntity>>;
    async fn items(&self, order_id: Uuid) -> Result<Vec<OrderItemEntity>>;
    async fn list_all(&self) -> Result<Vec<OrderEntity>>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<OrderEntity>>;
    /// Marks the order paid and records the payment. `false` when it was already paid.
    async fn settle(&self, order_id: Uuid, settlement: OrderSettlement) -> Result<bool>;
    async fn transition(
        &self,
        order_id: Uuid,
        expected: OrderStatus,
        next: OrderStatus,
        release_table_at: Option<Uuid>,
    ) -> Result<StatusUpdate>;
    /// Deletes the record and, when `release_table_at` is set, frees one table there in the
    /// same transaction.
    async fn delete(&self, order_id: Uuid, release_table_at: Option<Uuid>) -> Result<usize>;
}
