use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::reservations::{ReservationEntity, ReservationItemEntity},
    value_objects::{
        availability::{Placement, StatusUpdate},
        enums::reservation_statuses::ReservationStatus,
        payments::ReservationSettlement,
        reservations::ReservationDraft,
    },
};

#[async_trait]
#[automock]
pub trait ReservationRepository {
    /// Claims a table at the reservation's branch and inserts the reservation with its
    /// items in one transaction.
    async fn place(&self, draft: ReservationDraft) -> Result<Placement<ReservationEntity>>;
    async fn find_by_id(&self, reservation_id: Uuid) -> Result<Option<ReservationEntity>>;
    async fn items(&self, reservation_id: Uuid) -> Result<Vec<ReservationItemEntity>>;
    async fn list_all(&self) -> Result<Vec<ReservationEntity>>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ReservationEntity>>;
    async fn settle(&self, reservation_id: Uuid, settlement: ReservationSettlement) -> Result<bool>;
    async fn transition(
        &self,
        reservation_id: Uuid,
        expected: ReservationStatus,
        next: ReservationStatus,
        release_table_at: Option<Uuid>,
    ) -> Result<StatusUpdate>;
    /// Deletes the record and, when `release_table_at` is set, frees one table there in the
    /// same transaction.
    async fn delete(&self, reservation_id: Uuid, release_table_at: Option<Uuid>) -> Result<usize>;
}
