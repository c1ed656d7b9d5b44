// ABOUTME: Category management for TaskGen
// ABOUTME: User-scoped labels that tasks may reference without enforcement

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
