pub mod availability;
pub mod blogs;
pub mod branches;
pub mod carts;
pub mod contacts;
pub mod dishes;
pub mod enums;
pub mod events;
pub mod notifications;
pub mod orders;
pub mod payments;
pub mod pricing;
pub mod reservations;
pub mod revenue;
