//! Application layer: the payment state machine and the buyer session
//! that ties it to the cart and the order history.
//!
//! Background work (the confirmation delay and the display windows) runs
//! as `tokio` tasks that report back over a channel; the session applies
//! those reports one at a time, so all state has a single owner.

pub mod simulator;
pub mod storefront;
