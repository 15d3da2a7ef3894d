pub mod blogs;
pub mod branches;
pub mod carts;
pub mod contacts;
pub mod dishes;
pub mod events;
pub mod notifications;
pub mod orders;
pub mod reservations;
pub mod revenue;
