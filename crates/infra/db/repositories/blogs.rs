use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::blogs},
};
use domain::{
    entities::blogs::{BlogEntity, EditBlogEntity, InsertBlogEntity},
    repositories::blogs::BlogRepository,
};

pub struct BlogPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BlogPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BlogRepository for BlogPostgres {
    async fn list(&self) -> Result<Vec<BlogEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = blogs::table
            .select(BlogEntity::as_select())
            .order(blogs::created_at.desc())
            .load::<BlogEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, blog_id: Uuid) -> Result<Option<BlogEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = blogs::table
            .filter(blogs::id.eq(blog_id))
            .select(BlogEntity::as_select())
            .first::<BlogEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create(&self, insert_blog_entity: InsertBlogEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(blogs::table)
            .values(&insert_blog_entity)
            .returning(blogs::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update(&self, blog_id: Uuid, edit_blog_entity: EditBlogEntity) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(blogs::table)
            .filter(blogs::id.eq(blog_id))
            .set(&edit_blog_entity)
            .execute(&mut conn)?;

        Ok(affected)
    }

    async fn delete(&self, blog_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = delete(blogs::table.filter(blogs::id.eq(blog_id))).execute(&mut conn)?;

        Ok(affected)
    }
}
