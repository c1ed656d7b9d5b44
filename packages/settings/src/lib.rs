// ABOUTME: Per-user settings for TaskGen
// ABOUTME: One row per user, written by whole-record upsert, defaulted at read

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
