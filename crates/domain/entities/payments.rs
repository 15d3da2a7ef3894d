use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::payments;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = payments)]
pub struct PaymentEntity {
    pub id: Uuid,
    pub order_id: Option<Uuid>,
    pub reservation_id: Option<Uuid>,
    pub user_id: Uuid,
    pub amount: i64,
    pub discount: i64,
    pub final_amount: i64,
    pub payment_method: String,
    pub status: String,
    pub qr_code: Option<String>,
    pub transaction_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = payments)]
pub struct InsertPaymentEntity {
    pub id: Uuid,
    pub order_id: Option<Uuid>,
    pub reservation_id: Option<Uuid>,
    pub user_id: Uuid,
    pub amount: i64,
    pub discount: i64,
    pub final_amount: i64,
    pub payment_method: String,
    pub status: String,
    pub qr_code: Option<String>,
    pub transaction_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}
