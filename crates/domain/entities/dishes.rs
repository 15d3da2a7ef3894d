use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::dishes;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = dishes)]
pub struct DishEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub image: Option<String>,
    pub category: String,
    pub discount: i32,
    pub available: bool,
    pub event_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = dishes)]
pub struct InsertDishEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub image: Option<String>,
    pub category: String,
    pub discount: i32,
    pub available: bool,
    pub event_id: Option<Uuid>,
}

#[derive(Debug, Clone, AsChangeset, PartialEq)]
#[diesel(table_name = dishes, treat_none_as_null = true)]
pub struct EditDishEntity {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub image: Option<String>,
    pub category: String,
    pub discount: i32,
    pub available: bool,
    pub event_id: Option<Uuid>,
}
