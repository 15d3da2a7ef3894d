use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{
        notifications::InsertNotificationEntity,
        orders::{InsertOrderEntity, InsertOrderItemEntity, OrderEntity, OrderItemEntity},
        payments::PaymentEntity,
    },
    value_objects::{
        enums::{
            order_statuses::OrderStatus, order_types::OrderType, paid_statuses::PaidStatus,
            payment_timings::PaymentTiming,
        },
        notifications::large_order_notification,
        payments::PaymentDto,
        pricing::{PriceBreakdown, PricedLine},
    },
};

/// Cash on delivery is only accepted up to and including this final price.
pub const COD_CEILING: i64 = 10_000_000;

/// Orders above this final price are escalated to an admin.
pub const LARGE_ORDER_THRESHOLD: i64 = 100_000_000;

pub fn cod_allowed(final_price: i64) -> bool {
    final_price <= COD_CEILING
}

pub fn requires_escalation(final_price: i64) -> bool {
    final_price > LARGE_ORDER_THRESHOLD
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub branch_id: Option<Uuid>,
    #[serde(default)]
    pub guests: Option<i32>,
    #[serde(default)]
    pub payment_timing: PaymentTiming,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub large_order_note: Option<String>,
}

impl PlaceOrderRequest {
    /// Branch the order sits at; only dine-in orders carry one.
    pub fn table_branch(&self) -> Result<Option<Uuid>> {
        match self.order_type {
            OrderType::DineIn => match self.branch_id {
                Some(branch_id) => Ok(Some(branch_id)),
                None => bail!("a branch is required for dine-in orders"),
            },
            OrderType::Takeaway => Ok(None),
        }
    }
}

/// Everything written by one order placement. The repository persists it as a
/// single unit together with the table claim.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub order: InsertOrderEntity,
    pub items: Vec<InsertOrderItemEntity>,
    pub notification: Option<InsertNotificationEntity>,
    pub claim_table_at: Option<Uuid>,
}

impl OrderDraft {
    pub fn build(user_id: Uuid, request: &PlaceOrderRequest, pricing: &PriceBreakdown) -> Result<Self> {
        if pricing.lines.is_empty() {
            bail!("an order needs at least one available dish");
        }

        let branch_id = request.table_branch()?;
        let order_id = Uuid::new_v4();
        let dine_in = request.order_type.occupies_table();
        let escalate = requires_escalation(pricing.final_price);

        let order = InsertOrderEntity {
            id: order_id,
            user_id,
            order_type: request.order_type.to_string(),
            branch_id,
            guests: if dine_in { request.guests } else { None },
            payment_timing: request.payment_timing.to_string(),
            total_price: pricing.total_price,
            discount: pricing.discount,
            final_price: pricing.final_price,
            status: OrderStatus::Pending.to_string(),
            payment_status: PaidStatus::Unpaid.to_string(),
            delivery_address: if dine_in {
                None
            } else {
                request.delivery_address.clone()
            },
            full_name: request.full_name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            special_requests: request.special_requests.clone(),
            admin_notified: escalate,
            large_order_note: request.large_order_note.clone(),
        };

        let items = pricing
            .lines
            .iter()
            .map(|line| order_item(order_id, line))
            .collect();

        let notification = escalate.then(|| {
            large_order_notification(
                order_id,
                user_id,
                pricing.final_price,
                request.full_name.as_deref(),
                request.large_order_note.as_deref(),
            )
        });

        Ok(Self {
            order,
            items,
            notification,
            claim_table_at: branch_id,
        })
    }
}

fn order_item(order_id: Uuid, line: &PricedLine) -> InsertOrderItemEntity {
    InsertOrderItemEntity {
        id: Uuid::new_v4(),
        order_id,
        dish_id: Some(line.dish_id),
        name: line.name.clone(),
        quantity: line.quantity,
        price: line.unit_price,
        discount: line.discount_percent,
    }
}

/// Where the client goes after placing an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextStep {
    OrderPayment { order_id: Uuid },
    ReservationPayment { reservation_id: Uuid },
    Profile,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacedOrder {
    pub order_id: Uuid,
    pub final_price: i64,
    pub admin_notified: bool,
    pub next: NextStep,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemDto {
    pub dish_id: Option<Uuid>,
    pub name: String,
    pub quantity: i32,
    pub price: i64,
    pub discount: i32,
}

impl From<OrderItemEntity> for OrderItemDto {
    fn from(value: OrderItemEntity) -> Self {
        Self {
            dish_id: value.dish_id,
            name: value.name,
            quantity: value.quantity,
            price: value.price,
            discount: value.discount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDto {
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
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemDto>,
}

impl OrderDto {
    pub fn new(order: OrderEntity, items: Vec<OrderItemEntity>) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            order_type: order.order_type,
            branch_id: order.branch_id,
            guests: order.guests,
            payment_timing: order.payment_timing,
            total_price: order.total_price,
            discount: order.discount,
            final_price: order.final_price,
            status: order.status,
            payment_status: order.payment_status,
            payment_method: order.payment_method,
            delivery_address: order.delivery_address,
            full_name: order.full_name,
            email: order.email,
            phone: order.phone,
            special_requests: order.special_requests,
            paid_at: order.paid_at,
            admin_notified: order.admin_notified,
            created_at: order.created_at,
            items: items.into_iter().map(OrderItemDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDetailDto {
    pub order: OrderDto,
    pub payment: Option<PaymentDto>,
}

impl OrderDetailDto {
    pub fn new(order: OrderEntity, items: Vec<OrderItemEntity>, payment: Option<PaymentEntity>) -> Self {
        Self {
            order: OrderDto::new(order, items),
            payment: payment.map(PaymentDto::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusModel {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pricing(final_price: i64) -> PriceBreakdown {
        PriceBreakdown {
            lines: vec![PricedLine {
                dish_id: Uuid::new_v4(),
                name: "Lau".to_string(),
                unit_price: final_price,
                discount_percent: 0,
                quantity: 1,
                item_total: final_price,
                item_discount: 0,
            }],
            total_price: final_price,
            discount: 0,
            final_price,
        }
    }

    #[test]
    fn cod_ceiling_is_inclusive() {
        assert!(cod_allowed(10_000_000));
        assert!(!cod_allowed(10_000_001));
    }

    #[test]
    fn escalation_threshold_is_exclusive() {
        assert!(!requires_escalation(100_000_000));
        assert!(requires_escalation(100_000_001));
    }

    #[test]
    fn dine_in_without_branch_is_rejected() {
        let request = PlaceOrderRequest {
            order_type: OrderType::DineIn,
            ..Default::default()
        };
        assert!(OrderDraft::build(Uuid::new_v4(), &request, &pricing(50_000)).is_err());
    }

    #[test]
    fn empty_pricing_is_rejected() {
        let request = PlaceOrderRequest::default();
        assert!(OrderDraft::build(Uuid::new_v4(), &request, &PriceBreakdown::default()).is_err());
    }

    #[test]
    fn takeaway_draft_snapshots_lines_and_skips_table() {
        let request = PlaceOrderRequest {
            order_type: OrderType::Takeaway,
            branch_id: Some(Uuid::new_v4()),
            guests: Some(4),
            delivery_address: Some("12 Hang Bac".to_string()),
            ..Default::default()
        };
        let draft = OrderDraft::build(Uuid::new_v4(), &request, &pricing(80_000)).unwrap();

        assert_eq!(draft.claim_table_at, None);
        assert_eq!(draft.order.branch_id, None);
        assert_eq!(draft.order.guests, None);
        assert_eq!(draft.order.delivery_address.as_deref(), Some("12 Hang Bac"));
        assert_eq!(draft.order.status, "pending");
        assert_eq!(draft.order.payment_status, "unpaid");
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].order_id, draft.order.id);
        assert_eq!(draft.items[0].price, 80_000);
        assert!(draft.notification.is_none());
    }

    #[test]
    fn large_dine_in_order_claims_table_and_escalates() {
        let branch_id = Uuid::new_v4();
        let request = PlaceOrderRequest {
            order_type: OrderType::DineIn,
            branch_id: Some(branch_id),
            guests: Some(30),
            full_name: Some("Minh".to_string()),
            ..Default::default()
        };
        let draft = OrderDraft::build(Uuid::new_v4(), &request, &pricing(150_000_000)).unwrap();

        assert_eq!(draft.claim_table_at, Some(branch_id));
        assert!(draft.order.admin_notified);
        let notification = draft.notification.unwrap();
        assert_eq!(notification.order_id, Some(draft.order.id));
        assert_eq!(notification.amount, 150_000_000);
        assert_eq!(notification.kind, "large_order");
    }
}
