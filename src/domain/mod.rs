//! Domain model: money, listings, the cart, payment attempts and the
//! transactions they produce, plus the ports the application depends on.

pub mod cart;
pub mod listing;
pub mod money;
pub mod payment;
pub mod ports;
pub mod transaction;
