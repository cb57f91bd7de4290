//! keel-lib: build configuration for multi-module JVM and Android projects.
//!
//! - `properties`: typed access to module properties
//! - `toolchain`: per packaging kind configuration and plugin scopes
//! - `policy`: allow-list driven transitive resolution policy
//! - `task` and `tool`: ordered tasks that fetch and verify the lint tool
//! - `configure`: the per-module pipeline tying these together

pub mod build;
pub mod configure;
pub mod consts;
pub mod lint;
pub mod module;
pub mod policy;
pub mod properties;
pub mod task;
pub mod tool;
pub mod toolchain;
pub mod util;
