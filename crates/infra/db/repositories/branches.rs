use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, dsl::count, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{branch_dishes, branch_images, branches, dishes},
    },
};
use domain::{
    entities::{
        branches::{
            BranchDishEntity, BranchEntity, BranchImageEntity, EditBranchEntity, InsertBranchEntity,
        },
        dishes::DishEntity,
    },
    repositories::branches::BranchRepository,
};

pub struct BranchPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BranchPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

fn menu_links(branch_id: Uuid, dish_ids: &[Uuid]) -> Vec<BranchDishEntity> {
    let mut dish_ids = dish_ids.to_vec();
    dish_ids.sort();
    dish_ids.dedup();
    dish_ids
        .into_iter()
        .map(|dish_id| BranchDishEntity { branch_id, dish_id })
        .collect()
}

#[async_trait]
impl BranchRepository for BranchPostgres {
    async fn list(&self) -> Result<Vec<BranchEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = branches::table
            .select(BranchEntity::as_select())
            .order(branches::name.asc())
            .load::<BranchEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, branch_id: Uuid) -> Result<Option<BranchEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = branches::table
            .filter(branches::id.eq(branch_id))
            .select(BranchEntity::as_select())
            .first::<BranchEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn images(&self, branch_id: Uuid) -> Result<Vec<BranchImageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = branch_images::table
            .filter(branch_images::branch_id.eq(branch_id))
            .order(branch_images::position.asc())
            .select(BranchImageEntity::as_select())
            .load::<BranchImageEntity>(&mut conn)?;

        Ok(results)
    }

    async fn menu(&self, branch_id: Uuid) -> Result<Vec<DishEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = branch_dishes::table
            .inner_join(dishes::table)
            .filter(branch_dishes::branch_id.eq(branch_id))
            .order(dishes::name.asc())
            .select(DishEntity::as_select())
            .load::<DishEntity>(&mut conn)?;

        Ok(results)
    }

    async fn serving_all(&self, mut dish_ids: Vec<Uuid>) -> Result<Vec<BranchEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        dish_ids.sort();
        dish_ids.dedup();
        if dish_ids.is_empty() {
            let results = branches::table
                .select(BranchEntity::as_select())
                .order(branches::name.asc())
                .load::<BranchEntity>(&mut conn)?;
            return Ok(results);
        }

        let required = dish_ids.len() as i64;
        let branch_ids = branch_dishes::table
            .filter(branch_dishes::dish_id.eq_any(&dish_ids))
            .group_by(branch_dishes::branch_id)
            .having(count(branch_dishes::dish_id).eq(required))
            .select(branch_dishes::branch_id)
            .load::<Uuid>(&mut conn)?;

        let results = branches::table
            .filter(branches::id.eq_any(&branch_ids))
            .select(BranchEntity::as_select())
            .order(branches::name.asc())
            .load::<BranchEntity>(&mut conn)?;

        Ok(results)
    }

    async fn create(
        &self,
        insert_branch_entity: InsertBranchEntity,
        images: Vec<BranchImageEntity>,
        dish_ids: Vec<Uuid>,
    ) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let branch_id = conn.transaction::<Uuid, diesel::result::Error, _>(|tx| {
            let branch_id = insert_into(branches::table)
                .values(&insert_branch_entity)
                .returning(branches::id)
                .get_result::<Uuid>(tx)?;

            insert_into(branch_images::table)
                .values(&images)
                .execute(tx)?;
            insert_into(branch_dishes::table)
                .values(&menu_links(branch_id, &dish_ids))
                .execute(tx)?;

            Ok(branch_id)
        })?;

        Ok(branch_id)
    }

    async fn update(
        &self,
        branch_id: Uuid,
        edit_branch_entity: EditBranchEntity,
        images: Vec<BranchImageEntity>,
        dish_ids: Vec<Uuid>,
    ) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = conn.transaction::<usize, diesel::result::Error, _>(|tx| {
            let affected = update(branches::table)
                .filter(branches::id.eq(branch_id))
                .set(&edit_branch_entity)
                .execute(tx)?;
            if affected == 0 {
                return Ok(0);
            }

            delete(branch_images::table.filter(branch_images::branch_id.eq(branch_id)))
                .execute(tx)?;
            insert_into(branch_images::table)
                .values(&images)
                .execute(tx)?;

            delete(branch_dishes::table.filter(branch_dishes::branch_id.eq(branch_id)))
                .execute(tx)?;
            insert_into(branch_dishes::table)
                .values(&menu_links(branch_id, &dish_ids))
                .execute(tx)?;

            Ok(affected)
        })?;

        Ok(affected)
    }

    async fn delete(&self, branch_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected =
            delete(branches::table.filter(branches::id.eq(branch_id))).execute(&mut conn)?;

        Ok(affected)
    }
}
