use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, upsert::excluded};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::session_carts},
};
use domain::{
    entities::session_carts::SessionCartRow,
    repositories::session_carts::SessionCartRepository,
    value_objects::carts::{Cart, CartLine},
};

pub struct SessionCartPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SessionCartPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SessionCartRepository for SessionCartPostgres {
    async fn load(&self, session_id: Uuid) -> Result<Cart> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = session_carts::table
            .filter(session_carts::session_id.eq(session_id))
            .select(SessionCartRow::as_select())
            .first::<SessionCartRow>(&mut conn)
            .optional()?;

        match row {
            Some(row) => {
                let lines: Vec<CartLine> = serde_json::from_value(row.lines)?;
                Ok(Cart::new(lines))
            }
            None => Ok(Cart::default()),
        }
    }

    async fn save(&self, session_id: Uuid, user_id: Uuid, cart: Cart) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = SessionCartRow {
            session_id,
            user_id,
            lines: serde_json::to_value(&cart.lines)?,
            updated_at: Utc::now(),
        };

        insert_into(session_carts::table)
            .values(&row)
            .on_conflict(session_carts::session_id)
            .do_update()
            .set((
                session_carts::lines.eq(excluded(session_carts::lines)),
                session_carts::updated_at.eq(excluded(session_carts::updated_at)),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn clear(&self, session_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        delete(session_carts::table.filter(session_carts::session_id.eq(session_id)))
            .execute(&mut conn)?;

        Ok(())
    }
}
