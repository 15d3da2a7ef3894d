pub mod blogs;
pub mod branches;
pub mod contacts;
pub mod dishes;
pub mod events;
pub mod notifications;
pub mod orders;
pub mod payments;
pub mod reservations;
pub mod session_carts;
