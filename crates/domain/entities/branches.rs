use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::{branch_dishes, branch_images, branches};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = branches)]
pub struct BranchEntity {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub opening_hours: Option<String>,
    pub description: Option<String>,
    pub total_tables: i32,
    pub available_tables: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = branches)]
pub struct InsertBranchEntity {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub opening_hours: Option<String>,
    pub description: Option<String>,
    pub total_tables: i32,
    pub available_tables: i32,
}

#[derive(Debug, Clone, AsChangeset, PartialEq)]
#[diesel(table_name = branches, treat_none_as_null = true)]
pub struct EditBranchEntity {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub opening_hours: Option<String>,
    pub description: Option<String>,
    pub total_tables: i32,
    pub available_tables: i32,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Insertable, PartialEq)]
#[diesel(table_name = branch_images)]
pub struct BranchImageEntity {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub url: String,
    pub position: i32,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = branch_dishes)]
pub struct BranchDishEntity {
    pub branch_id: Uuid,
    pub dish_id: Uuid,
}
