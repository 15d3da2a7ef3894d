use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::branches::BranchEntity;

/// Result of a write that had to claim a table first.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement<T> {
    Placed(T),
    /// The conditional decrement matched no row; nothing was written.
    NoTableAvailable,
}

/// Result of a conditional status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    Applied { table_released: bool },
    /// The stored status no longer matched the expected one.
    Conflict,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableCounts {
    pub branch_id: Uuid,
    pub total_tables: i32,
    pub available_tables: i32,
}

impl From<BranchEntity> for TableCounts {
    fn from(value: BranchEntity) -> Self {
        Self {
            branch_id: value.id,
            total_tables: value.total_tables,
            available_tables: value.available_tables,
        }
    }
}
