//! tally-core
//!
//! Category normalization, expense aggregation, view state and the reconcilers
//! that apply budget service responses to local state.
//! Depends on tally-domain. No terminal I/O and no HTTP; the service is reached
//! only through [`BudgetGateway`].

pub mod aggregate;
pub mod auth_service;
pub mod controller;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod profile_service;
pub mod validation;

pub use aggregate::*;
pub use auth_service::AuthService;
pub use controller::ViewState;
pub use dashboard::Dashboard;
pub use error::{CoreError, CoreResult, GatewayError, ValidationError};
pub use gateway::{BudgetGateway, TokenSink};
pub use normalize::{normalize, normalize_opt};
pub use profile_service::ProfileService;
