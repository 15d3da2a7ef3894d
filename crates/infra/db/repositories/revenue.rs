use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{
    RunQueryDsl,
    define_sql_function,
    dsl::not,
    prelude::*,
    sql_types::{Nullable, Timestamptz},
};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{orders, payments},
    },
};
use domain::{
    entities::{orders::OrderEntity, payments::PaymentEntity},
    repositories::revenue::RevenueRepository,
    value_objects::enums::{
        paid_statuses::PaidStatus, payment_statuses::PaymentStatus, payment_timings::PaymentTiming,
    },
};

define_sql_function! {
    /// `COALESCE(paid_at, created_at)`: when a revenue event happened.
    fn coalesce(paid_at: Nullable<Timestamptz>, created_at: Timestamptz) -> Timestamptz;
}

pub struct RevenuePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl RevenuePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl RevenueRepository for RevenuePostgres {
    async fn completed_payments(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = payments::table
            .filter(payments::status.eq(PaymentStatus::Completed.to_string()))
            .filter(coalesce(payments::paid_at, payments::created_at).ge(start))
            .filter(coalesce(payments::paid_at, payments::created_at).lt(end))
            .select(PaymentEntity::as_select())
            .load::<PaymentEntity>(&mut conn)?;

        Ok(results)
    }

    async fn cod_orders_without_payment(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let paid_order_ids = payments::table
            .filter(payments::order_id.is_not_null())
            .select(payments::order_id.assume_not_null());

        let results = orders::table
            .filter(orders::payment_timing.eq(PaymentTiming::Cod.to_string()))
            .filter(orders::payment_status.eq(PaidStatus::Paid.to_string()))
            .filter(not(orders::id.eq_any(paid_order_ids)))
            .filter(coalesce(orders::paid_at, orders::created_at).ge(start))
            .filter(coalesce(orders::paid_at, orders::created_at).lt(end))
            .select(OrderEntity::as_select())
            .load::<OrderEntity>(&mut conn)?;

        Ok(results)
    }
}
