//! Entity access modules.
//!
//! Each module is a unit struct whose associated functions take the shared
//! [`ApiClient`] and map one-to-one onto REST calls. Single-entity fetches
//! return [`Lookup`] so a missing entity is not treated as a failure.

pub mod auth;
pub mod comments;
pub mod notifications;
pub mod projects;
pub mod tasks;
pub mod users;

pub use auth::{AuthApi, LoginResponse};
pub use comments::{CommentApi, DEFAULT_RECENT_LIMIT};
pub use notifications::NotificationApi;
pub use projects::ProjectApi;
pub use tasks::{TaskApi, TaskCriteria};
pub use users::UserApi;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientResult;
use crate::gateway::{ApiClient, Endpoint, RequestOptions};
use crate::lookup::Lookup;

/// Endpoint for one entity of a collection, e.g. `/tasks/t1`.
pub(crate) fn item(collection: &str, id: &str) -> Endpoint {
    Endpoint::new(collection).segment(id)
}

pub(crate) async fn fetch_list<T: DeserializeOwned>(
    client: &ApiClient,
    endpoint: Endpoint,
) -> ClientResult<Vec<T>> {
    Ok(client.request(&endpoint, RequestOptions::get()).await?)
}

/// GET a single entity, turning a not-found failure into [`Lookup::NotFound`].
pub(crate) async fn fetch_optional<T: DeserializeOwned>(
    client: &ApiClient,
    endpoint: Endpoint,
) -> ClientResult<Lookup<T>> {
    match client.request(&endpoint, RequestOptions::get()).await {
        Ok(entity) => Ok(Lookup::Found(entity)),
        Err(err) if err.is_not_found() => {
            tracing::debug!(%endpoint, "Entity not found");
            Ok(Lookup::NotFound)
        }
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn send_json<B, T>(
    client: &ApiClient,
    endpoint: Endpoint,
    options: RequestOptions,
    body: &B,
) -> ClientResult<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let options = options.json(body)?;
    Ok(client.request(&endpoint, options).await?)
}

pub(crate) async fn remove(client: &ApiClient, endpoint: Endpoint) -> ClientResult<()> {
    client
        .request_no_content(&endpoint, RequestOptions::delete())
        .await?;
    Ok(())
}
