use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::session_carts;

/// Raw row used for Diesel queries. Lines stay as JSON and are parsed into a `Cart`.
#[derive(Debug, Clone, Selectable, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = session_carts)]
pub struct SessionCartRow {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub lines: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
