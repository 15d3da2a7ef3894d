use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::{
        postgres::{
            postgres_connection::PgPoolSquad,
            schema::{notifications, order_items, orders, payments},
        },
        repositories::availability::{claim_table, release_table},
    },
};
use domain::{
    entities::orders::{OrderEntity, OrderItemEntity},
    repositories::orders::OrderRepository,
    value_objects::{
        availability::{Placement, StatusUpdate},
        enums::{order_statuses::OrderStatus, paid_statuses::PaidStatus},
        orders::OrderDraft,
        payments::OrderSettlement,
    },
};

pub struct OrderPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl OrderPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OrderRepository for OrderPostgres {
    async fn place(&self, draft: OrderDraft) -> Result<Placement<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let placement = conn.transaction::<Placement<OrderEntity>, diesel::result::Error, _>(|tx| {
            if let Some(branch_id) = draft.claim_table_at {
                if claim_table(tx, branch_id)?.is_none() {
                    return Ok(Placement::NoTableAvailable);
                }
            }

            let order = insert_into(orders::table)
                .values(&draft.order)
                .returning(OrderEntity::as_returning())
                .get_result::<OrderEntity>(tx)?;

            insert_into(order_items::table)
                .values(&draft.items)
                .execute(tx)?;

            if let Some(notification) = &draft.notification {
                insert_into(notifications::table)
                    .values(notification)
                    .execute(tx)?;
            }

            Ok(Placement::Placed(order))
        })?;

        Ok(placement)
    }

    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = orders::table
            .filter(orders::id.eq(order_id))
            .select(OrderEntity::as_select())
            .first::<OrderEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn items(&self, order_id: Uuid) -> Result<Vec<OrderItemEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = order_items::table
            .filter(order_items::order_id.eq(order_id))
            .select(OrderItemEntity::as_select())
            .load::<OrderItemEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_all(&self) -> Result<Vec<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = orders::table
            .select(OrderEntity::as_select())
            .order(orders::created_at.desc())
            .load::<OrderEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = orders::table
            .filter(orders::user_id.eq(user_id))
            .select(OrderEntity::as_select())
            .order(orders::created_at.desc())
            .load::<OrderEntity>(&mut conn)?;

        Ok(results)
    }

    async fn settle(&self, order_id: Uuid, settlement: OrderSettlement) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let settled = conn.transaction::<bool, diesel::result::Error, _>(|tx| {
            let affected = update(orders::table)
                .filter(orders::id.eq(order_id))
                .filter(orders::payment_status.eq(PaidStatus::Unpaid.to_string()))
                .set(&settlement.order)
                .execute(tx)?;
            if affected == 0 {
                return Ok(false);
            }

            insert_into(payments::table)
                .values(&settlement.payment)
                .execute(tx)?;

            Ok(true)
        })?;

        Ok(settled)
    }

    async fn transition(
        &self,
        order_id: Uuid,
        expected: OrderStatus,
        next: OrderStatus,
        release_table_at: Option<Uuid>,
    ) -> Result<StatusUpdate> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let outcome = conn.transaction::<StatusUpdate, diesel::result::Error, _>(|tx| {
            let affected = update(orders::table)
                .filter(orders::id.eq(order_id))
                .filter(orders::status.eq(expected.to_string()))
                .set(orders::status.eq(next.to_string()))
                .execute(tx)?;
            if affected == 0 {
                return Ok(StatusUpdate::Conflict);
            }

            let table_released = match release_table_at {
                Some(branch_id) => release_table(tx, branch_id)?.is_some(),
                None => false,
            };

            Ok(StatusUpdate::Applied { table_released })
        })?;

        Ok(outcome)
    }

    async fn delete(&self, order_id: Uuid, release_table_at: Option<Uuid>) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = conn.transaction::<usize, diesel::result::Error, _>(|tx| {
            let affected = delete(orders::table.filter(orders::id.eq(order_id))).execute(tx)?;
            if affected > 0 {
                if let Some(branch_id) = release_table_at {
                    release_table(tx, branch_id)?;
                }
            }
            Ok(affected)
        })?;

        Ok(affected)
    }
}
