#![doc(test(attr(deny(warnings))))]

//! Tally is a terminal client for a remote personal budget service: sign in,
//! record expenses against a budget, and explore spending by category.

pub mod cli;
pub mod errors;
pub mod session;
pub mod utils;

pub use errors::TallyError;
pub use session::Session;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the tracing subscriber once per process.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("tally tracing initialized");
    });
}
