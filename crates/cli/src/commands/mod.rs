//! Command handlers. Each submodule maps CLI arguments onto client calls and
//! renders the result as text, or as JSON with `--json`.

pub mod auth;
pub mod comments;
pub mod dashboard;
pub mod notifications;
pub mod projects;
pub mod tasks;
pub mod users;

use anyhow::{bail, Result};
use serde::Serialize;

use taskdeck_client::{ApiClient, Lookup};
use taskdeck_core::filters::selection;

/// Shared state for one command invocation.
pub struct Ctx {
    pub client: ApiClient,
    pub json: bool,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Unwrap a lookup, reporting a missing entity as an error.
pub fn require<T>(lookup: Lookup<T>, entity: &str, id: &str) -> Result<T> {
    match lookup {
        Lookup::Found(value) => Ok(value),
        Lookup::NotFound => bail!("{entity} {id} not found"),
    }
}

/// Parse an optional selector argument where `all` means no restriction.
pub fn selector<T: From<String>>(raw: Option<&str>) -> Option<T> {
    raw.and_then(selection).map(T::from)
}
