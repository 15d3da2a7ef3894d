use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::domain::{
    entities::{
        orders::{OrderEntity, SettleOrderEntity},
        payments::{InsertPaymentEntity, PaymentEntity},
        reservations::{ReservationEntity, SettleReservationEntity},
    },
    value_objects::enums::{
        order_statuses::OrderStatus, paid_statuses::PaidStatus, payment_methods::PaymentMethod,
        payment_statuses::PaymentStatus, reservation_statuses::ReservationStatus,
    },
};

const QR_IMAGE_BASE: &str = "https://img.vietqr.io/image";

/// `TXN{unix millis}{last 6 hex digits of the paid entity id}`.
pub fn transaction_id(entity_id: Uuid, at: DateTime<Utc>) -> String {
    let simple = entity_id.simple().to_string();
    let suffix = &simple[simple.len() - 6..];
    format!("TXN{}{}", at.timestamp_millis(), suffix)
}

pub fn parse_payment_method(raw: &str) -> Result<PaymentMethod> {
    PaymentMethod::from_str(raw.trim())
        .ok_or_else(|| anyhow!("unsupported payment method '{raw}', expected bank, momo or cash"))
}

/// Receiving bank account shown on the transfer QR image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BankQrAccount {
    pub bank_id: String,
    pub account_no: String,
    pub account_name: String,
}

impl BankQrAccount {
    pub fn qr_url(&self, amount: i64, reference: &str) -> Result<String> {
        let base = format!(
            "{QR_IMAGE_BASE}/{}-{}-compact2.jpg",
            self.bank_id, self.account_no
        );
        let url = Url::parse_with_params(
            &base,
            &[
                ("amount", amount.to_string().as_str()),
                ("addInfo", reference),
                ("accountName", self.account_name.as_str()),
            ],
        )?;
        Ok(url.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmPaymentModel {
    pub payment_method: String,
}

/// A confirmed payment plus the state written to the paid entity, persisted together.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSettlement {
    pub payment: InsertPaymentEntity,
    pub order: SettleOrderEntity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReservationSettlement {
    pub payment: InsertPaymentEntity,
    pub reservation: SettleReservationEntity,
}

fn completed_payment(
    order_id: Option<Uuid>,
    reservation_id: Option<Uuid>,
    user_id: Uuid,
    amounts: (i64, i64, i64),
    method: PaymentMethod,
    qr_code: Option<String>,
    now: DateTime<Utc>,
) -> InsertPaymentEntity {
    let (amount, discount, final_amount) = amounts;
    let paid_entity = order_id.or(reservation_id).unwrap_or_default();
    InsertPaymentEntity {
        id: Uuid::new_v4(),
        order_id,
        reservation_id,
        user_id,
        amount,
        discount,
        final_amount,
        payment_method: method.to_string(),
        status: PaymentStatus::Completed.to_string(),
        qr_code,
        transaction_id: Some(transaction_id(paid_entity, now)),
        paid_at: Some(now),
    }
}

impl OrderSettlement {
    /// Customer confirmation of a prepaid order.
    pub fn prepaid(
        order: &OrderEntity,
        method: PaymentMethod,
        qr_code: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::settle(order, method, qr_code, OrderStatus::Paid, now)
    }

    /// Admin completion of a cash on delivery order.
    pub fn cash_on_delivery(order: &OrderEntity, now: DateTime<Utc>) -> Self {
        Self::settle(order, PaymentMethod::Cash, None, OrderStatus::Completed, now)
    }

    fn settle(
        order: &OrderEntity,
        method: PaymentMethod,
        qr_code: Option<String>,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            payment: completed_payment(
                Some(order.id),
                None,
                order.user_id,
                (order.total_price, order.discount, order.final_price),
                method,
                qr_code,
                now,
            ),
            order: SettleOrderEntity {
                status: status.to_string(),
                payment_status: PaidStatus::Paid.to_string(),
                payment_method: Some(method.to_string()),
                paid_at: Some(now),
            },
        }
    }
}

impl ReservationSettlement {
    pub fn new(
        reservation: &ReservationEntity,
        method: PaymentMethod,
        qr_code: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            payment: completed_payment(
                None,
                Some(reservation.id),
                reservation.user_id,
                (
                    reservation.total_amount,
                    reservation.food_discount,
                    reservation.total_amount,
                ),
                method,
                qr_code,
                now,
            ),
            reservation: SettleReservationEntity {
                status: ReservationStatus::Confirmed.to_string(),
                payment_status: PaidStatus::Paid.to_string(),
                payment_method: Some(method.to_string()),
                paid_at: Some(now),
            },
        }
    }
}

/// What the client needs to render the payment step of an unpaid order or reservation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentPageDto {
    pub kind: String,
    pub reference_id: Uuid,
    pub amount: i64,
    pub discount: i64,
    pub final_amount: i64,
    pub reference: String,
    pub bank_qr_url: String,
    pub methods: Vec<PaymentMethod>,
}

impl PaymentPageDto {
    pub fn new(
        kind: &str,
        reference_id: Uuid,
        amounts: (i64, i64, i64),
        account: &BankQrAccount,
    ) -> Result<Self> {
        let (amount, discount, final_amount) = amounts;
        let reference = payment_reference(kind, reference_id);
        Ok(Self {
            kind: kind.to_string(),
            reference_id,
            amount,
            discount,
            final_amount,
            bank_qr_url: account.qr_url(final_amount, &reference)?,
            reference,
            methods: vec![PaymentMethod::Bank, PaymentMethod::Momo, PaymentMethod::Cash],
        })
    }
}

/// Transfer note that lets the receiving account match the transfer to its record.
pub fn payment_reference(kind: &str, reference_id: Uuid) -> String {
    let simple = reference_id.simple().to_string();
    format!("{} {}", kind.to_uppercase(), &simple[simple.len() - 8..])
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentDto {
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

impl From<PaymentEntity> for PaymentDto {
    fn from(value: PaymentEntity) -> Self {
        Self {
            id: value.id,
            order_id: value.order_id,
            reservation_id: value.reservation_id,
            user_id: value.user_id,
            amount: value.amount,
            discount: value.discount,
            final_amount: value.final_amount,
            payment_method: value.payment_method,
            status: value.status,
            qr_code: value.qr_code,
            transaction_id: value.transaction_id,
            paid_at: value.paid_at,
            created_at: value.created_at,
        }
    }
}
