//! bytebank-domain
//!
//! Pure domain models (Account, Transaction).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod account;
pub mod transaction;

pub use account::*;
pub use transaction::*;
