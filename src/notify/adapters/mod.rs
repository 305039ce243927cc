//! Adapter implementations for the notification workflow's ports.

pub mod memory;
pub mod postgres;
