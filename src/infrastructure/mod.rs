//! Adapters for the domain ports: the in-memory order history and the
//! simulated payment confirmations.

pub mod confirmation;
pub mod in_memory;
