//! bytebank-core
//!
//! Business logic and services for Bytebank.
//! Depends on bytebank-domain. No CLI, no terminal I/O, no filesystem access.

pub mod account_service;
pub mod auth_service;
pub mod error;
pub mod format;
pub mod forms;
pub mod registration_service;
pub mod session;
pub mod storage;
pub mod time;

pub use account_service::*;
pub use auth_service::*;
pub use error::CoreError;
pub use registration_service::*;
pub use session::{Session, SessionError};
pub use storage::{KeyValueStore, MemoryStore, StorageService};
pub use time::{Clock, FixedClock, SystemClock};
