use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{
        payments::PaymentEntity,
        reservations::{
            InsertReservationEntity, InsertReservationItemEntity, ReservationEntity,
            ReservationItemEntity,
        },
    },
    value_objects::{
        enums::{paid_statuses::PaidStatus, reservation_statuses::ReservationStatus},
        orders::NextStep,
        payments::PaymentDto,
        pricing::{LineRequest, PriceBreakdown},
    },
};

/// Fixed charge for holding a table, independent of the food ordered.
pub const DEPOSIT_AMOUNT: i64 = 100_000;

/// Reservation slots are interpreted in UTC and must lie strictly after `now`.
pub fn validate_reservation_time(date: NaiveDate, time: NaiveTime, now: DateTime<Utc>) -> Result<()> {
    let requested = date.and_time(time).and_utc();
    if requested <= now {
        bail!("reservation time must be in the future");
    }
    Ok(())
}

pub fn reservation_total(deposit_amount: i64, food_total: i64, food_discount: i64) -> i64 {
    deposit_amount + (food_total - food_discount)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceReservationRequest {
    pub branch_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: i32,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub dishes: Vec<LineRequest>,
}

impl PlaceReservationRequest {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<()> {
        if self.guests < 1 {
            bail!("a reservation needs at least one guest");
        }
        validate_reservation_time(self.date, self.time, now)
    }

    /// Requested dishes with a positive quantity.
    pub fn dish_lines(&self) -> Vec<LineRequest> {
        self.dishes
            .iter()
            .copied()
            .filter(|line| line.quantity > 0)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReservationDraft {
    pub reservation: InsertReservationEntity,
    pub items: Vec<InsertReservationItemEntity>,
}

impl ReservationDraft {
    pub fn build(user_id: Uuid, request: &PlaceReservationRequest, pricing: &PriceBreakdown) -> Self {
        let reservation_id = Uuid::new_v4();

        let reservation = InsertReservationEntity {
            id: reservation_id,
            user_id,
            branch_id: request.branch_id,
            date: request.date,
            time: request.time,
            guests: request.guests,
            special_requests: request.special_requests.clone(),
            deposit_amount: DEPOSIT_AMOUNT,
            food_total: pricing.total_price,
            food_discount: pricing.discount,
            total_amount: reservation_total(DEPOSIT_AMOUNT, pricing.total_price, pricing.discount),
            status: ReservationStatus::Pending.to_string(),
            payment_status: PaidStatus::Unpaid.to_string(),
        };

        let items = pricing
            .lines
            .iter()
            .map(|line| InsertReservationItemEntity {
                id: Uuid::new_v4(),
                reservation_id,
                dish_id: Some(line.dish_id),
                name: line.name.clone(),
                quantity: line.quantity,
                price: line.unit_price,
                discount: line.discount_percent,
            })
            .collect();

        Self { reservation, items }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacedReservation {
    pub reservation_id: Uuid,
    pub total_amount: i64,
    pub next: NextStep,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservationItemDto {
    pub dish_id: Option<Uuid>,
    pub name: String,
    pub quantity: i32,
    pub price: i64,
    pub discount: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservationDto {
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
    pub items: Vec<ReservationItemDto>,
}

impl ReservationDto {
    pub fn new(reservation: ReservationEntity, items: Vec<ReservationItemEntity>) -> Self {
        Self {
            id: reservation.id,
            user_id: reservation.user_id,
            branch_id: reservation.branch_id,
            date: reservation.date,
            time: reservation.time,
            guests: reservation.guests,
            special_requests: reservation.special_requests,
            deposit_amount: reservation.deposit_amount,
            food_total: reservation.food_total,
            food_discount: reservation.food_discount,
            total_amount: reservation.total_amount,
            status: reservation.status,
            payment_status: reservation.payment_status,
            payment_method: reservation.payment_method,
            paid_at: reservation.paid_at,
            created_at: reservation.created_at,
            items: items
                .into_iter()
                .map(|item| ReservationItemDto {
                    dish_id: item.dish_id,
                    name: item.name,
                    quantity: item.quantity,
                    price: item.price,
                    discount: item.discount,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservationDetailDto {
    pub reservation: ReservationDto,
    pub payment: Option<PaymentDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationStatusModel {
    pub status: ReservationStatus,
}

impl ReservationDetailDto {
    pub fn new(
        reservation: ReservationEntity,
        items: Vec<ReservationItemEntity>,
        payment: Option<PaymentEntity>,
    ) -> Self {
        Self {
            reservation: ReservationDto::new(reservation, items),
            payment: payment.map(PaymentDto::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::pricing::PricedLine;
    use chrono::Duration;

    fn request(at: DateTime<Utc>, guests: i32) -> PlaceReservationRequest {
        PlaceReservationRequest {
            branch_id: Uuid::new_v4(),
            date: at.date_naive(),
            time: at.time(),
            guests,
            special_requests: None,
            dishes: vec![
                LineRequest { dish_id: Uuid::new_v4(), quantity: 1 },
                LineRequest { dish_id: Uuid::new_v4(), quantity: 0 },
                LineRequest { dish_id: Uuid::new_v4(), quantity: -3 },
            ],
        }
    }

    #[test]
    fn total_is_deposit_plus_discounted_food() {
        assert_eq!(reservation_total(DEPOSIT_AMOUNT, 50_000, 5_000), 145_000);
        assert_eq!(reservation_total(DEPOSIT_AMOUNT, 0, 0), DEPOSIT_AMOUNT);
    }

    #[test]
    fn time_must_be_strictly_in_the_future() {
        let now = Utc::now();
        assert!(request(now, 2).validate(now).is_err());
        assert!(request(now - Duration::hours(1), 2).validate(now).is_err());
        assert!(request(now + Duration::hours(1), 2).validate(now).is_ok());
    }

    #[test]
    fn at_least_one_guest() {
        let now = Utc::now();
        assert!(request(now + Duration::days(1), 0).validate(now).is_err());
    }

    #[test]
    fn empty_quantities_are_skipped() {
        let now = Utc::now();
        assert_eq!(request(now, 2).dish_lines().len(), 1);
    }

    #[test]
    fn draft_carries_deposit_and_food_totals() {
        let now = Utc::now() + Duration::days(2);
        let dish_id = Uuid::new_v4();
        let pricing = PriceBreakdown {
            lines: vec![PricedLine {
                dish_id,
                name: "Goi cuon".to_string(),
                unit_price: 25_000,
                discount_percent: 10,
                quantity: 2,
                item_total: 50_000,
                item_discount: 5_000,
            }],
            total_price: 50_000,
            discount: 5_000,
            final_price: 45_000,
        };

        let draft = ReservationDraft::build(Uuid::new_v4(), &request(now, 4), &pricing);

        assert_eq!(draft.reservation.deposit_amount, 100_000);
        assert_eq!(draft.reservation.food_total, 50_000);
        assert_eq!(draft.reservation.food_discount, 5_000);
        assert_eq!(draft.reservation.total_amount, 145_000);
        assert_eq!(draft.reservation.status, "pending");
        assert_eq!(draft.reservation.payment_status, "unpaid");
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].dish_id, Some(dish_id));
    }
}
