use contracts::shared::api::{ApiEnvelope, ApiError};
use contracts::shared::endpoints;
use contracts::system::auth::{normalize_user, LoginRequest, LoginResponse, UserInfo};
use serde_json::Value;

use crate::shared::api::{ApiClient, RequestOptions};

/// Login with username and password; returns the raw user record.
pub async fn login(client: &ApiClient, username: String, password: String) -> Result<Value, ApiError> {
    let request = LoginRequest { username, password };
    let response: LoginResponse = client
        .post(endpoints::AUTH_LOGIN, &request, RequestOptions::default())
        .await?;
    into_data(response)
}

/// Notifies the server; bounded by the short logout timeout.
pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    let timeout = client.config().logout_timeout_ms;
    client
        .post_empty(endpoints::AUTH_LOGOUT, RequestOptions::timeout(timeout))
        .await
}

/// Get current user info
pub async fn current_user(client: &ApiClient) -> Result<UserInfo, ApiError> {
    let response: ApiEnvelope<Value> = client
        .get(endpoints::AUTH_ME, RequestOptions::default())
        .await?;
    let raw = into_data(response)?;
    normalize_user(&raw).map_err(ApiError::decode)
}

/// Unwraps `{ success, data }`, turning `success: false` into an error that
/// carries the server message.
pub fn into_data<T>(envelope: ApiEnvelope<T>) -> Result<T, ApiError> {
    match envelope {
        ApiEnvelope {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        ApiEnvelope {
            success: false,
            message,
            ..
        } => Err(ApiError::rejected(message)),
        ApiEnvelope { data: None, .. } => Err(ApiError::decode("missing `data`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_data() {
        let ok: ApiEnvelope<Value> = serde_json::from_value(json!({
            "success": true,
            "data": { "_id": "1", "name": "A", "role": "admin" }
        }))
        .unwrap();
        assert_eq!(into_data(ok).unwrap()["_id"], "1");

        let refused: ApiEnvelope<Value> =
            serde_json::from_value(json!({ "success": false, "message": "Compte désactivé" })).unwrap();
        assert_eq!(into_data(refused).unwrap_err().message, "Compte désactivé");

        let empty: ApiEnvelope<Value> = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(into_data(empty).is_err());
    }
}
