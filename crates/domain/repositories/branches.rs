use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::{
    branches::{BranchEntity, BranchImageEntity, EditBranchEntity, InsertBranchEntity},
    dishes::DishEntity,
};

#[async_trait]
#[automock]
pub trait BranchRepository {
    async fn list(&self) -> Result<Vec<BranchEntity>>;
    async fn find_by_id(&self, branch_id: Uuid) -> Result<Option<BranchEntity>>;
    async fn images(&self, branch_id: Uuid) -> Result<Vec<BranchImageEntity>>;
    async fn menu(&self, branch_id: Uuid) -> Result<Vec<DishEntity>>;
    /// Branches whose menu contains every one of `dish_ids`.
    async fn serving_all(&self, dish_ids: Vec<Uuid>) -> Result<Vec<BranchEntity>>;
    async fn create(
        &self,
        insert_branch_entity: InsertBranchEntity,
        images: Vec<BranchImageEntity>,
        dish_ids: Vec<Uuid>,
    ) -> Result<Uuid>;
    async fn update(
        &self,
        branch_id: Uuid,
        edit_branch_entity: EditBranchEntity,
        images: Vec<BranchImageEntity>,
        dish_ids: Vec<Uuid>,
    ) -> Result<usize>;
    async fn delete(&self, branch_id: Uuid) -> Result<usize>;
}
