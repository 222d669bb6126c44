//! Authentication endpoints. Login and registration are the only calls that
//! run without a credential; `me` takes its token explicitly because it runs
//! during restore, before the store has committed anything.

use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::session::{Role, User};

use super::client::ApiClient;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub role: Role,
}

/// `{ access_token, token_type, user }` as issued by login and registration.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub user: User,
}

pub async fn login(api: &ApiClient, req: &LoginRequest) -> ApiResult<TokenResponse> {
    api.post_json_public("auth/login", req).await
}

pub async fn register(api: &ApiClient, req: &RegisterRequest) -> ApiResult<TokenResponse> {
    api.post_json_public("auth/register", req).await
}

pub async fn me(api: &ApiClient, token: &str) -> ApiResult<User> {
    api.get_json_with_token("auth/me", token).await
}
