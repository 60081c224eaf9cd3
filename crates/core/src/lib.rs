//! Domain types and pure view logic for the taskdeck dashboard.
//!
//! This crate performs no I/O. Entity models mirror the remote API's JSON;
//! the view modules derive list filters, statistics and joins from
//! collections the caller has already fetched.

pub mod error;
pub mod filters;
pub mod models;
pub mod permissions;
pub mod relations;
pub mod stats;
pub mod time_format;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;
