//! Unit tests for the task context.

mod domain_tests;
mod service_tests;
