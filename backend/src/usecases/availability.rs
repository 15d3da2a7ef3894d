use std::sync::Arc;

use axum::http::StatusCode;
use crates::domain::{
    repositories::availability::TableAvailabilityRepository,
    value_objects::availability::TableCounts,
};
use tracing::{info, warn};
use uuid::Uuid;

use super::errors::{RestaurantError, UseCaseResult, storage_failure};

/// Table counters of a branch. Every mutation is one conditional update in storage, so
/// concurrent callers can never push a counter outside `0..=total_tables`.
pub struct AvailabilityUseCase<T>
where
    T: TableAvailabilityRepository + Send + Sync + 'static,
{
    availability_repo: Arc<T>,
}

impl<T> AvailabilityUseCase<T>
where
    T: TableAvailabilityRepository + Send + Sync + 'static,
{
    pub fn new(availability_repo: Arc<T>) -> Self {
        Self { availability_repo }
    }

    pub async fn counts(&self, branch_id: Uuid) -> UseCaseResult<TableCounts> {
        self.availability_repo
            .find_branch(branch_id)
            .await
            .map_err(storage_failure("availability: failed to load branch"))?
            .map(TableCounts::from)
            .ok_or(RestaurantError::NotFound("branch"))
    }

    pub async fn reserve_table(&self, branch_id: Uuid) -> UseCaseResult<TableCounts> {
        match self.claim(branch_id).await? {
            Some(counts) => Ok(counts),
            None => {
                self.ensure_exists(branch_id).await?;
                warn!(
                    %branch_id,
                    status = StatusCode::BAD_REQUEST.as_u16(),
                    "availability: no table left to reserve"
                );
                Err(RestaurantError::NoCapacity)
            }
        }
    }

    pub async fn release_table(&self, branch_id: Uuid) -> UseCaseResult<TableCounts> {
        match self.release(branch_id).await? {
            Some(counts) => Ok(counts),
            None => {
                self.ensure_exists(branch_id).await?;
                warn!(
                    %branch_id,
                    status = StatusCode::BAD_REQUEST.as_u16(),
                    "availability: every table is already free"
                );
                Err(RestaurantError::InvalidState(
                    "every table of this branch is already free".to_string(),
                ))
            }
        }
    }

    /// Admin adjustment: frees one more table, bounded by the branch capacity.
    pub async fn add_table_slot(&self, branch_id: Uuid) -> UseCaseResult<TableCounts> {
        match self.release(branch_id).await? {
            Some(counts) => {
                info!(%branch_id, available_tables = counts.available_tables, "availability: table slot added");
                Ok(counts)
            }
            None => {
                self.ensure_exists(branch_id).await?;
                Err(RestaurantError::InvalidState(
                    "available tables already equal the branch capacity".to_string(),
                ))
            }
        }
    }

    /// Admin adjustment: takes one free table out of service.
    pub async fn remove_table_slot(&self, branch_id: Uuid) -> UseCaseResult<TableCounts> {
        match self.claim(branch_id).await? {
            Some(counts) => {
                info!(%branch_id, available_tables = counts.available_tables, "availability: table slot removed");
                Ok(counts)
            }
            None => {
                self.ensure_exists(branch_id).await?;
                Err(RestaurantError::InvalidState(
                    "no available table left to remove".to_string(),
                ))
            }
        }
    }

    async fn claim(&self, branch_id: Uuid) -> UseCaseResult<Option<TableCounts>> {
        let claimed = self
            .availability_repo
            .claim_table(branch_id)
            .await
            .map_err(storage_failure("availability: failed to claim table"))?;
        Ok(claimed.map(TableCounts::from))
    }

    async fn release(&self, branch_id: Uuid) -> UseCaseResult<Option<TableCounts>> {
        let released = self
            .availability_repo
            .release_table(branch_id)
            .await
            .map_err(storage_failure("availability: failed to release table"))?;
        Ok(released.map(TableCounts::from))
    }

    /// A guard miss is only meaningful when the branch exists.
    async fn ensure_exists(&self, branch_id: Uuid) -> UseCaseResult<()> {
        self.counts(branch_id).await.map(|_| ())
    }
}
