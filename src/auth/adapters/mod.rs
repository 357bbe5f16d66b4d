//! Adapter implementations for account persistence ports.

pub mod memory;
pub mod postgres;
