//! tally-domain
//!
//! Pure data types exchanged with the budget service and derived by the core.
//! No I/O, no CLI, no HTTP. Only data types and small enums.

pub mod auth;
pub mod budget;
pub mod expense;
pub mod profile;
pub mod view;

pub use auth::*;
pub use budget::*;
pub use expense::*;
pub use profile::*;
pub use view::*;
