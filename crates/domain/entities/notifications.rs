use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::notifications;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = notifications)]
pub struct NotificationEntity {
    pub id: Uuid,
    pub kind: String,
    pub order_id: Option<Uuid>,
    pub reservation_id: Option<Uuid>,
    pub user_id: Uuid,
    pub amount: i64,
    pub message: String,
    pub user_note: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = notifications)]
pub struct InsertNotificationEntity {
    pub id: Uuid,
    pub kind: String,
    pub order_id: Option<Uuid>,
    pub reservation_id: Option<Uuid>,
    pub user_id: Uuid,
    pub amount: i64,
    pub message: String,
    pub user_note: Option<String>,
    pub status: String,
}
