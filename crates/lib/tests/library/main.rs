//! End-to-end tests for keel-lib.

mod common;
mod pipeline_tests;
