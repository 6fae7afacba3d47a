use contracts::system::auth::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo};

use crate::shared::api_utils::{get_json_authorized, post_json, post_json_unit};

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let request = LoginRequest { username, password };
    post_json("/api/system/auth/login", &request, "Login").await
}

/// Refresh access token using refresh token
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    let request = RefreshRequest { refresh_token };
    post_json("/api/system/auth/refresh", &request, "Refresh").await
}

/// Logout (revoke refresh token)
pub async fn logout(refresh_token: String) -> Result<(), String> {
    let request = RefreshRequest { refresh_token };
    post_json_unit("/api/system/auth/logout", &request, "Logout").await
}

/// Get current user info
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, String> {
    get_json_authorized("/api/system/auth/me", access_token)
        .await
        .map_err(String::from)
}
