use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::notifications::{InsertNotificationEntity, NotificationEntity},
    value_objects::{
        enums::{
            notification_statuses::NotificationStatus, notification_types::NotificationType,
        },
        pricing::format_amount,
    },
};

pub const NO_SPECIAL_REQUEST: &str = "No special request";

pub fn large_order_notification(
    order_id: Uuid,
    user_id: Uuid,
    final_price: i64,
    customer_name: Option<&str>,
    note: Option<&str>,
) -> InsertNotificationEntity {
    let customer = customer_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("unknown customer");
    let user_note = note
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .unwrap_or(NO_SPECIAL_REQUEST);

    InsertNotificationEntity {
        id: Uuid::new_v4(),
        kind: NotificationType::LargeOrder.to_string(),
        order_id: Some(order_id),
        reservation_id: None,
        user_id,
        amount: final_price,
        message: format!(
            "High value order: {} from customer {customer}",
            format_amount(final_price)
        ),
        user_note: Some(user_note.to_string()),
        status: NotificationStatus::Pending.to_string(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationDto {
    pub id: Uuid,
    pub kind: NotificationType,
    pub order_id: Option<Uuid>,
    pub reservation_id: Option<Uuid>,
    pub user_id: Uuid,
    pub amount: i64,
    pub message: String,
    pub user_note: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationEntity> for NotificationDto {
    fn from(value: NotificationEntity) -> Self {
        Self {
            id: value.id,
            kind: NotificationType::from_str(&value.kind),
            order_id: value.order_id,
            reservation_id: value.reservation_id,
            user_id: value.user_id,
            amount: value.amount,
            message: value.message,
            user_note: value.user_note,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_carries_formatted_amount_and_customer() {
        let order_id = Uuid::new_v4();
        let n = large_order_notification(order_id, Uuid::new_v4(), 150_000_000, Some("Minh"), None);

        assert_eq!(n.message, "High value order: 150.000.000 from customer Minh");
        assert_eq!(n.user_note.as_deref(), Some(NO_SPECIAL_REQUEST));
        assert_eq!(n.status, "pending");
        assert_eq!(n.order_id, Some(order_id));
    }

    #[test]
    fn note_is_kept_when_given() {
        let n = large_order_notification(
            Uuid::new_v4(),
            Uuid::new_v4(),
            200_000_000,
            None,
            Some("Company party, invoice needed"),
        );
        assert_eq!(n.user_note.as_deref(), Some("Company party, invoice needed"));
        assert!(n.message.ends_with("unknown customer"));
    }
}
