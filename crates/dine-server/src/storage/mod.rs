//! Storage layer
//!
//! Read-only access to the SQLite catalog. Every query returns the full
//! matching row set; callers decide what an empty set means.

mod column;
pub mod db;
pub mod flag;

pub use db::{Database, StoreError};
pub use flag::FlagEncoding;
