use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::{event_branches, event_dishes, events};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = events)]
pub struct EventEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub discount: i32,
    pub discount_type: String,
    pub is_global: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = events)]
pub struct InsertEventEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub discount: i32,
    pub discount_type: String,
    pub is_global: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset, PartialEq)]
#[diesel(table_name = events, treat_none_as_null = true)]
pub struct EditEventEntity {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub discount: i32,
    pub discount_type: String,
    pub is_global: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = event_branches)]
pub struct EventBranchEntity {
    pub event_id: Uuid,
    pub branch_id: Uuid,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = event_dishes)]
pub struct EventDishEntity {
    pub event_id: Uuid,
    pub dish_id: Uuid,
}
