//! HTTP access layer for the taskdeck dashboard API.
//!
//! [`ApiClient`] owns the transport and the [`Session`]; the unit structs in
//! [`api`] wrap each REST resource, and [`UserAdmin`] composes them into the
//! permission-checked user administration actions.

pub mod admin;
pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod lookup;
pub mod session;

pub use admin::UserAdmin;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, RequestError, StorageError};
pub use gateway::{ApiClient, Endpoint, RequestOptions};
pub use lookup::Lookup;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
