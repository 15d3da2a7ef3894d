use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::blogs;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = blogs)]
pub struct BlogEntity {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = blogs)]
pub struct InsertBlogEntity {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, AsChangeset, PartialEq)]
#[diesel(table_name = blogs, treat_none_as_null = true)]
pub struct EditBlogEntity {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub author: Option<String>,
    pub updated_at: DateTime<Utc>,
}
