use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::{reservation_items, reservations};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = reservations)]
pub struct ReservationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub branch_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: i32,
    pub special_requests: Option<String>,
    pub deposit_amount: i64,
    pub food_total: i64,
    pub food_discount: i64,
    pub total_amount: i64,
    pub status: String,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = reservations)]
pub struct InsertReservationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub branch_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: i32,
    pub special_requests: Option<String>,
    pub deposit_amount: i64,
    pub food_total: i64,
    pub food_discount: i64,
    pub total_amount: i64,
    pub status: String,
    pub payment_status: String,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = reservation_items)]
pub struct ReservationItemEntity {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub dish_id: Option<Uuid>,
    pub name: String,
    pub quantity: i32,
    pub price: i64,
    pub discount: i32,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = reservation_items)]
pub struct InsertReservationItemEntity {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub dish_id: Option<Uuid>,
    pub name: String,
    pub quantity: i32,
    pub price: i64,
    pub discount: i32,
}

#[derive(Debug, Clone, AsChangeset, PartialEq)]
#[diesel(table_name = reservations)]
pub struct SettleReservationEntity {
    pub status: String,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}
