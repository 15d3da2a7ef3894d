pub mod contact_statuses;
pub mod discount_types;
pub mod dish_categories;
pub mod notification_statuses;
pub mod notification_types;
pub mod order_statuses;
pub mod order_types;
pub mod paid_statuses;
pub mod payment_methods;
pub mod payment_statuses;
pub mod payment_timings;
pub mod reservation_statuses;
pub mod roles;
