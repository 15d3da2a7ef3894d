use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::dishes},
};
use domain::{
    entities::dishes::{DishEntity, EditDishEntity, InsertDishEntity},
    repositories::dishes::DishRepository,
    value_objects::dishes::DishFilter,
};

pub struct DishPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl DishPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl DishRepository for DishPostgres {
    async fn list(&self, filter: DishFilter) -> Result<Vec<DishEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = dishes::table.select(DishEntity::as_select()).into_boxed();

        if let Some(category) = filter.category {
            query = query.filter(dishes::category.eq(category.to_string()));
        }
        if let Some(term) = filter.search_term() {
            let pattern = format!("%{term}%");
            query = query.filter(
                dishes::name
                    .ilike(pattern.clone())
                    .or(dishes::description.ilike(pattern)),
            );
        }

        let results = query
            .order((dishes::category.asc(), dishes::name.asc()))
            .load::<DishEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, dish_id: Uuid) -> Result<Option<DishEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = dishes::table
            .filter(dishes::id.eq(dish_id))
            .select(DishEntity::as_select())
            .first::<DishEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_ids(&self, dish_ids: Vec<Uuid>) -> Result<Vec<DishEntity>> {
        if dish_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = dishes::table
            .filter(dishes::id.eq_any(&dish_ids))
            .select(DishEntity::as_select())
            .load::<DishEntity>(&mut conn)?;

        Ok(results)
    }

    async fn create(&self, insert_dish_entity: InsertDishEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(dishes::table)
            .values(&insert_dish_entity)
            .returning(dishes::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update(&self, dish_id: Uuid, edit_dish_entity: EditDishEntity) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(dishes::table)
            .filter(dishes::id.eq(dish_id))
            .set(&edit_dish_entity)
            .execute(&mut conn)?;

        Ok(affected)
    }

    async fn delete(&self, dish_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = delete(dishes::table.filter(dishes::id.eq(dish_id))).execute(&mut conn)?;

        Ok(affected)
    }
}
