//! Shared data contracts for the feedback-analysis services.
//!
//! Three cooperating pieces, all synchronous and stateless:
//!
//! - a schema/type registry ([`registry`]): typed record shapes for
//!   feedback items, analysis results, account settings and third-party
//!   responses, each validated and normalized at the boundary where
//!   external data enters the system;
//! - a resource-name builder ([`arn`]): canonical topic/table names and
//!   `Fn::Join` reference expressions for the provisioning tooling;
//! - the [`YearMonthBucket`] key type for per-month usage counters.
//!
//! The crate performs no I/O and installs no logging subscriber; it emits
//! `tracing` events and leaves the rest to the consuming service.

mod checks;
mod defaults;

pub mod arn;
pub mod errors;
pub mod models;
pub mod registry;
pub mod year_month;

pub use crate::checks::Validate;
pub use crate::errors::ValidationError;
pub use crate::registry::{validate, validate_named, Contract, ShapeName};
pub use crate::year_month::YearMonthBucket;
