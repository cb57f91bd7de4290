//! CLI integration tests.

mod common;
mod configure_tests;
mod policy_tests;
