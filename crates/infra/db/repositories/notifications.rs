use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::notifications},
};
use domain::{
    entities::notifications::NotificationEntity,
    repositories::notifications::NotificationRepository,
    value_objects::enums::notification_statuses::NotificationStatus,
};

pub struct NotificationPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl NotificationPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl NotificationRepository for NotificationPostgres {
    async fn list_pending(&self) -> Result<Vec<NotificationEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = notifications::table
            .filter(notifications::status.eq(NotificationStatus::Pending.to_string()))
            .select(NotificationEntity::as_select())
            .order(notifications::created_at.desc())
            .load::<NotificationEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, notification_id: Uuid) -> Result<Option<NotificationEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = notifications::table
            .filter(notifications::id.eq(notification_id))
            .select(NotificationEntity::as_select())
            .first::<NotificationEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn update_status(
        &self,
        notification_id: Uuid,
        expected: NotificationStatus,
        next: NotificationStatus,
    ) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(notifications::table)
            .filter(notifications::id.eq(notification_id))
            .filter(notifications::status.eq(expected.to_string()))
            .set(notifications::status.eq(next.to_string()))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
