use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;

use crate::domain::entities::{orders::OrderEntity, payments::PaymentEntity};

#[async_trait]
#[automock]
pub trait RevenueRepository {
    /// Completed payments whose `paid_at` (or `created_at`) lies in `[start, end)`.
    async fn completed_payments(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<PaymentEntity>>;
    /// Paid cash on delivery orders in `[start, end)` that have no payment record.
    async fn cod_orders_without_payment(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<OrderEntity>>;
}
