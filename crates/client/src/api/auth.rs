//! Authentication endpoints and the persisted identity.

use serde::{Deserialize, Serialize};
use taskdeck_core::models::User;

use crate::error::ClientResult;
use crate::gateway::{ApiClient, Endpoint, RequestOptions};

/// Body of a successful `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    /// Token lifetime in seconds. Informational only; expiry is enforced by
    /// the API.
    #[serde(default)]
    pub expires_in: u64,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ProfileResponse {
    user: User,
}

/// Access to `/auth`.
pub struct AuthApi;

impl AuthApi {
    /// Exchange credentials for a token and persist the token together with
    /// the returned user.
    pub async fn login(client: &ApiClient, email: &str, password: &str) -> ClientResult<User> {
        let options = RequestOptions::post().json(&Credentials { email, password })?;
        let response: LoginResponse = client
            .request(&Endpoint::new("/auth/login"), options)
            .await?;

        client
            .session()
            .establish(&response.access_token, &response.user)?;

        tracing::info!(
            user_id = %response.user.id,
            expires_in = response.expires_in,
            "Signed in"
        );
        Ok(response.user)
    }

    /// Forget the persisted token and user. Signing out twice is fine.
    pub fn logout(client: &ApiClient) -> ClientResult<()> {
        client.session().clear()?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// The user persisted at login, without contacting the API.
    pub fn current_user(client: &ApiClient) -> Option<User> {
        client.session().current_user()
    }

    /// Every user visible to the signed-in account.
    pub async fn list_users(client: &ApiClient) -> ClientResult<Vec<User>> {
        Ok(client
            .request(&Endpoint::new("/auth/users"), RequestOptions::post())
            .await?)
    }

    /// The signed-in user's profile as the API currently sees it.
    pub async fn profile(client: &ApiClient) -> ClientResult<User> {
        let response: ProfileResponse = client
            .request(&Endpoint::new("/auth/profile"), RequestOptions::post())
            .await?;
        Ok(response.user)
    }
}
