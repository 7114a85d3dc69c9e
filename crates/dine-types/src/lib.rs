//! Dine Types - Pure type definitions for the restaurant catalog
//!
//! Row records and filter criteria shared by the storage and HTTP layers.
//! No runtime or database dependencies live here.

pub mod dish;
pub mod flag;
pub mod restaurant;

pub use dish::*;
pub use flag::{parse_flag, ParseFlagError};
pub use restaurant::*;
