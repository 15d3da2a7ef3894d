use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{PgConnection, RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{event_branches, event_dishes, events},
    },
};
use domain::{
    entities::events::{
        EditEventEntity, EventBranchEntity, EventDishEntity, EventEntity, InsertEventEntity,
    },
    repositories::events::EventRepository,
};

pub struct EventPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl EventPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

fn replace_targets(
    tx: &mut PgConnection,
    event_id: Uuid,
    branch_ids: &[Uuid],
    dish_ids: &[Uuid],
) -> QueryResult<()> {
    delete(event_branches::table.filter(event_branches::event_id.eq(event_id))).execute(tx)?;
    delete(event_dishes::table.filter(event_dishes::event_id.eq(event_id))).execute(tx)?;

    let branch_links: Vec<_> = branch_ids
        .iter()
        .map(|&branch_id| EventBranchEntity { event_id, branch_id })
        .collect();
    let dish_links: Vec<_> = dish_ids
        .iter()
        .map(|&dish_id| EventDishEntity { event_id, dish_id })
        .collect();

    insert_into(event_branches::table)
        .values(&branch_links)
        .execute(tx)?;
    insert_into(event_dishes::table)
        .values(&dish_links)
        .execute(tx)?;

    Ok(())
}

#[async_trait]
impl EventRepository for EventPostgres {
    async fn list(&self) -> Result<Vec<EventEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = events::table
            .select(EventEntity::as_select())
            .order(events::start_date.desc())
            .load::<EventEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, event_id: Uuid) -> Result<Option<EventEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = events::table
            .filter(events::id.eq(event_id))
            .select(EventEntity::as_select())
            .first::<EventEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn targets(&self, event_id: Uuid) -> Result<(Vec<Uuid>, Vec<Uuid>)> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let branch_ids = event_branches::table
            .filter(event_branches::event_id.eq(event_id))
            .select(event_branches::branch_id)
            .load::<Uuid>(&mut conn)?;
        let dish_ids = event_dishes::table
            .filter(event_dishes::event_id.eq(event_id))
            .select(event_dishes::dish_id)
            .load::<Uuid>(&mut conn)?;

        Ok((branch_ids, dish_ids))
    }

    async fn active_for_branch(&self, branch_id: Uuid, now: DateTime<Utc>) -> Result<Vec<EventEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let targeted_events = event_branches::table
            .filter(event_branches::branch_id.eq(branch_id))
            .select(event_branches::event_id);

        let results = events::table
            .filter(events::start_date.le(now))
            .filter(events::end_date.ge(now))
            .filter(events::is_global.eq(true).or(events::id.eq_any(targeted_events)))
            .select(EventEntity::as_select())
            .order(events::start_date.desc())
            .load::<EventEntity>(&mut conn)?;

        Ok(results)
    }

    async fn create(
        &self,
        insert_event_entity: InsertEventEntity,
        branch_ids: Vec<Uuid>,
        dish_ids: Vec<Uuid>,
    ) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let event_id = conn.transaction::<Uuid, diesel::result::Error, _>(|tx| {
            let event_id = insert_into(events::table)
                .values(&insert_event_entity)
                .returning(events::id)
                .get_result::<Uuid>(tx)?;

            replace_targets(tx, event_id, &branch_ids, &dish_ids)?;

            Ok(event_id)
        })?;

        Ok(event_id)
    }

    async fn update(
        &self,
        event_id: Uuid,
        edit_event_entity: EditEventEntity,
        branch_ids: Vec<Uuid>,
        dish_ids: Vec<Uuid>,
    ) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = conn.transaction::<usize, diesel::result::Error, _>(|tx| {
            let affected = update(events::table)
                .filter(events::id.eq(event_id))
                .set(&edit_event_entity)
                .execute(tx)?;

            if affected > 0 {
                replace_targets(tx, event_id, &branch_ids, &dish_ids)?;
            }

            Ok(affected)
        })?;

        Ok(affected)
    }

    async fn delete(&self, event_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = delete(events::table.filter(events::id.eq(event_id))).execute(&mut conn)?;

        Ok(affected)
    }
}
