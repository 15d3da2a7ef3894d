use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::contacts},
};
use domain::{
    entities::contacts::{ContactEntity, InsertContactEntity},
    repositories::contacts::ContactRepository,
};

pub struct ContactPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ContactPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ContactRepository for ContactPostgres {
    async fn list(&self) -> Result<Vec<ContactEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = contacts::table
            .select(ContactEntity::as_select())
            .order(contacts::created_at.desc())
            .load::<ContactEntity>(&mut conn)?;

        Ok(results)
    }

    async fn create(&self, insert_contact_entity: InsertContactEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(contacts::table)
            .values(&insert_contact_entity)
            .returning(contacts::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update_status(&self, contact_id: Uuid, status: String) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(contacts::table)
            .filter(contacts::id.eq(contact_id))
            .set(contacts::status.eq(status))
            .execute(&mut conn)?;

        Ok(affected)
    }

    async fn delete(&self, contact_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected =
            delete(contacts::table.filter(contacts::id.eq(contact_id))).execute(&mut conn)?;

        Ok(affected)
    }
}
