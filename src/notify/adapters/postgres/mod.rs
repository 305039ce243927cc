//! `PostgreSQL` adapter for the durable runtime port.

mod models;
mod runtime;
mod schema;

pub use runtime::{NotifyPgPool, PostgresDurableRuntime};
