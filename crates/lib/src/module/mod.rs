//! Modules and their resolution scopes.

pub mod scopes;
mod types;

pub use scopes::{ScopeOrigin, ScopePolicy, ScopeRegistry};
pub use types::{Module, PackagingKind};
