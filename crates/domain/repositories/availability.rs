use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::branches::BranchEntity;

/// Table counters of a branch. Both mutations are single conditional updates in storage;
/// `None` means the guard did not hold (or the branch is gone) and nothing changed.
#[async_trait]
#[automock]
pub trait TableAvailabilityRepository {
    async fn find_branch(&self, branch_id: Uuid) -> Result<Option<BranchEntity>>;
    /// `available_tables - 1` guarded by `available_tables > 0`.
    async fn claim_table(&self, branch_id: Uuid) -> Result<Option<BranchEntity>>;
    /// `available_tables + 1` guarded by `available_tables < total_tables`.
    async fn release_table(&self, branch_id: Uuid) -> Result<Option<BranchEntity>>;
}
