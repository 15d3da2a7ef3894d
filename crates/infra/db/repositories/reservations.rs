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
            schema::{payments, reservation_items, reservations},
        },
        repositories::availability::{claim_table, release_table},
    },
};
use domain::{
    entities::reservations::{ReservationEntity, ReservationItemEntity},
    repositories::reservations::ReservationRepository,
    value_objects::{
        availability::{Placement, StatusUpdate},
        enums::{paid_statuses::PaidStatus, reservation_statuses::ReservationStatus},
        payments::ReservationSettlement,
        reservations::ReservationDraft,
    },
};

pub struct ReservationPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ReservationPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ReservationRepository for ReservationPostgres {
    async fn place(&self, draft: ReservationDraft) -> Result<Placement<ReservationEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let placement =
            conn.transaction::<Placement<ReservationEntity>, diesel::result::Error, _>(|tx| {
                if claim_table(tx, draft.reservation.branch_id)?.is_none() {
                    return Ok(Placement::NoTableAvailable);
                }

                let reservation = insert_into(reservations::table)
                    .values(&draft.reservation)
                    .returning(ReservationEntity::as_returning())
                    .get_result::<ReservationEntity>(tx)?;

                insert_into(reservation_items::table)
                    .values(&draft.items)
                    .execute(tx)?;

                Ok(Placement::Placed(reservation))
            })?;

        Ok(placement)
    }

    async fn find_by_id(&self, reservation_id: Uuid) -> Result<Option<ReservationEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = reservations::table
            .filter(reservations::id.eq(reservation_id))
            .select(ReservationEntity::as_select())
            .first::<ReservationEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn items(&self, reservation_id: Uuid) -> Result<Vec<ReservationItemEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = reservation_items::table
            .filter(reservation_items::reservation_id.eq(reservation_id))
            .select(ReservationItemEntity::as_select())
            .load::<ReservationItemEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_all(&self) -> Result<Vec<ReservationEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = reservations::table
            .select(ReservationEntity::as_select())
            .order((reservations::date.desc(), reservations::time.desc()))
            .load::<ReservationEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ReservationEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = reservations::table
            .filter(reservations::user_id.eq(user_id))
            .select(ReservationEntity::as_select())
            .order((reservations::date.desc(), reservations::time.desc()))
            .load::<ReservationEntity>(&mut conn)?;

        Ok(results)
    }

    async fn settle(&self, reservation_id: Uuid, settlement: ReservationSettlement) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let settled = conn.transaction::<bool, diesel::result::Error, _>(|tx| {
            let affected = update(reservations::table)
                .filter(reservations::id.eq(reservation_id))
                .filter(reservations::payment_status.eq(PaidStatus::Unpaid.to_string()))
                .set(&settlement.reservation)
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
        reservation_id: Uuid,
        expected: ReservationStatus,
        next: ReservationStatus,
        release_table_at: Option<Uuid>,
    ) -> Result<StatusUpdate> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let outcome = conn.transaction::<StatusUpdate, diesel::result::Error, _>(|tx| {
            let affected = update(reservations::table)
                .filter(reservations::id.eq(reservation_id))
                .filter(reservations::status.eq(expected.to_string()))
                .set(reservations::status.eq(next.to_string()))
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

    async fn delete(&self, reservation_id: Uuid, release_table_at: Option<Uuid>) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = conn.transaction::<usize, diesel::result::Error, _>(|tx| {
            let affected = delete(reservations::table.filter(reservations::id.eq(reservation_id))).execute(tx)?;
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
