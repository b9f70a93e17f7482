#![doc(test(attr(deny(warnings))))]

//! Bytebank bundles the account bookkeeping services behind a small shell
//! front-end.

pub mod cli;
pub mod utils;

pub use bytebank_config as config;
pub use bytebank_domain as domain;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Bytebank tracing initialized.");
    });
}
