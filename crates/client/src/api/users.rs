use taskdeck_core::models::{CreateUser, Role, UpdateUser, User};
use taskdeck_core::validation::validate_new_user;

use super::{fetch_list, fetch_optional, item, remove, send_json};
use crate::error::ClientResult;
use crate::gateway::{ApiClient, Endpoint, RequestOptions};
use crate::lookup::Lookup;

const USERS: &str = "/users";

/// Access to `/users`.
pub struct UserApi;

impl UserApi {
    pub async fn list(client: &ApiClient) -> ClientResult<Vec<User>> {
        fetch_list(client, Endpoint::new(USERS)).await
    }

    pub async fn get(client: &ApiClient, id: &str) -> ClientResult<Lookup<User>> {
        fetch_optional(client, item(USERS, id)).await
    }

    pub async fn list_by_role(client: &ApiClient, role: &Role) -> ClientResult<Vec<User>> {
        fetch_list(client, Endpoint::new(USERS).query("role", role.as_str())).await
    }

    /// Validate locally, then create. Invalid input never reaches the API.
    pub async fn create(client: &ApiClient, input: &CreateUser) -> ClientResult<User> {
        let input = validate_new_user(input)?;
        let user: User =
            send_json(client, Endpoint::new(USERS), RequestOptions::post(), &input).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn update(client: &ApiClient, id: &str, changes: &UpdateUser) -> ClientResult<User> {
        send_json(client, item(USERS, id), RequestOptions::patch(), changes).await
    }

    pub async fn delete(client: &ApiClient, id: &str) -> ClientResult<()> {
        remove(client, item(USERS, id)).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
