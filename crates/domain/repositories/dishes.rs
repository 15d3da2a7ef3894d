use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::dishes::{DishEntity, EditDishEntity, InsertDishEntity},
    value_objects::dishes::DishFilter,
};

#[async_trait]
#[automock]
pub trait DishRepository {
    async fn list(&self, filter: DishFilter) -> Result<Vec<DishEntity>>;
    async fn find_by_id(&self, dish_id: Uuid) -> Result<Option<DishEntity>>;
    async fn find_by_ids(&self, dish_ids: Vec<Uuid>) -> Result<Vec<DishEntity>>;
    async fn create(&self, insert_dish_entity: InsertDishEntity) -> Result<Uuid>;
    async fn update(&self, dish_id: Uuid, edit_dish_entity: EditDishEntity) -> Result<usize>;
    async fn delete(&self, dish_id: Uuid) -> Result<usize>;
}
