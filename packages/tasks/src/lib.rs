// ABOUTME: Task management for TaskGen
// ABOUTME: Provides task types, CRUD storage, and batch insertion of generated tasks

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
