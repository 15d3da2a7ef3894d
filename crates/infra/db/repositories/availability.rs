use anyhow::Result;
use async_trait::async_trait;
use diesel::{PgConnection, RunQueryDsl, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::branches},
};
use domain::{
    entities::branches::BranchEntity,
    repositories::availability::TableAvailabilityRepository,
};

/// Decrements the free table count only while it is positive. Runs inside whatever
/// transaction `conn` is in, so placements can claim and insert atomically.
pub(crate) fn claim_table(conn: &mut PgConnection, branch_id: Uuid) -> QueryResult<Option<BranchEntity>> {
    update(branches::table)
        .filter(branches::id.eq(branch_id))
        .filter(branches::available_tables.gt(0))
        .set(branches::available_tables.eq(branches::available_tables - 1))
        .returning(BranchEntity::as_returning())
        .get_result::<BranchEntity>(conn)
        .optional()
}

/// Increments the free table count only while it is below capacity.
pub(crate) fn release_table(conn: &mut PgConnection, branch_id: Uuid) -> QueryResult<Option<BranchEntity>> {
    update(branches::table)
        .filter(branches::id.eq(branch_id))
        .filter(branches::available_tables.lt(branches::total_tables))
        .set(branches::available_tables.eq(branches::available_tables + 1))
        .returning(BranchEntity::as_returning())
        .get_result::<BranchEntity>(conn)
        .optional()
}

pub struct TableAvailabilityPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl TableAvailabilityPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl TableAvailabilityRepository for TableAvailabilityPostgres {
    async fn find_branch(&self, branch_id: Uuid) -> Result<Option<BranchEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = branches::table
            .filter(branches::id.eq(branch_id))
            .select(BranchEntity::as_select())
            .first::<BranchEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn claim_table(&self, branch_id: Uuid) -> Result<Option<BranchEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        Ok(claim_table(&mut conn, branch_id)?)
    }

    async fn release_table(&self, branch_id: Uuid) -> Result<Option<BranchEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        Ok(release_table(&mut conn, branch_id)?)
    }
}
