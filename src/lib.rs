//! Storefront core for a produce marketplace: a buyer's cart and a
//! simulated mobile-money checkout.
//!
//! A [`Storefront`](application::storefront::Storefront) session owns the
//! cart, the payment state machine and the order history. Payments go
//! through a [`ConfirmationProvider`](domain::ports::ConfirmationProvider)
//! which answers after a delay; the state machine then holds the outcome for
//! a display window before returning to idle.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
