use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::{order_items, orders};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = orders)]
pub struct OrderEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_type: String,
    pub branch_id: Option<Uuid>,
    pub guests: Option<i32>,
    pub payment_timing: String,
    pub total_price: i64,
    pub discount: i64,
    pub final_price: i64,
    pub status: String,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub delivery_address: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub special_requests: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub admin_notified: bool,
    pub large_order_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = orders)]
pub struct InsertOrderEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_type: String,
    pub branch_id: Option<Uuid>,
    pub guests: Option<i32>,
    pub payment_timing: String,
    pub total_price: i64,
    pub discount: i64,
    pub final_price: i64,
    pub status: String,
    pub payment_status: String,
    pub delivery_address: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub special_requests: Option<String>,
    pub admin_notified: bool,
    pub large_order_note: Option<String>,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = order_items)]
pub struct OrderItemEntity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub dish_id: Option<Uuid>,
    pub name: String,
    pub quantity: i32,
    pub price: i64,
    pub discount: i32,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = order_items)]
pub struct InsertOrderItemEntity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub dish_id: Option<Uuid>,
    pub name: String,
    pub quantity: i32,
    pub price: i64,
    pub discount: i32,
}

/// Columns written when an order is settled, either by the customer or by a cash
/// on delivery completion.
#[derive(Debug, Clone, AsChangeset, PartialEq)]
#[diesel(table_name = orders)]
pub struct SettleOrderEntity {
    pub status: String,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}
