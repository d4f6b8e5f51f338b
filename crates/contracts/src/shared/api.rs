use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const TIMEOUT_MESSAGE: &str = "request timed out";
pub const NETWORK_MESSAGE: &str = "Impossible de joindre le serveur. Vérifiez votre connexion.";
pub const CANCELLED_MESSAGE: &str = "request cancelled";
pub const REJECTED_MESSAGE: &str = "Opération refusée par le serveur";

fn default_success() -> bool {
    true
}

/// Standard `{ success, data, message }` wrapper returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Error reported by the server with a status code
    #[default]
    Server,
    Unauthorized,
    Timeout,
    /// No response at all (DNS, CORS, offline)
    Network,
    Cancelled,
    /// Response arrived but did not match the expected shape
    Decode,
}

/// Error shape handed to pages: `{ message, success: false }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip)]
    pub kind: ApiErrorKind,
}

impl ApiError {
    fn new(kind: ApiErrorKind, message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            success: false,
            status,
            kind,
        }
    }

    pub fn timeout() -> Self {
        Self::new(ApiErrorKind::Timeout, TIMEOUT_MESSAGE, None)
    }

    pub fn network() -> Self {
        Self::new(ApiErrorKind::Network, NETWORK_MESSAGE, None)
    }

    pub fn cancelled() -> Self {
        Self::new(ApiErrorKind::Cancelled, CANCELLED_MESSAGE, None)
    }

    pub fn decode(detail: impl std::fmt::Display) -> Self {
        Self::new(
            ApiErrorKind::Decode,
            format!("Réponse du serveur illisible: {}", detail),
            None,
        )
    }

    /// A 2xx answer with `success: false`.
    pub fn rejected(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| REJECTED_MESSAGE.to_string());
        Self::new(ApiErrorKind::Server, message, None)
    }

    /// Builds the error for a non-2xx response, keeping the server message when
    /// the body carries one (`message` or `error`).
    pub fn from_status(status: u16, payload: Option<&Value>) -> Self {
        let kind = if status == 401 {
            ApiErrorKind::Unauthorized
        } else {
            ApiErrorKind::Server
        };
        let message = payload
            .and_then(server_message)
            .unwrap_or_else(|| format!("La requête a échoué (HTTP {})", status));
        Self::new(kind, message, Some(status))
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == ApiErrorKind::Timeout
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == ApiErrorKind::Cancelled
    }
}

fn server_message(payload: &Value) -> Option<String> {
    match payload {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timeout_shape() {
        let value = serde_json::to_value(ApiError::timeout()).unwrap();
        assert_eq!(value, json!({ "message": "request timed out", "success": false }));
    }

    #[test]
    fn test_server_message_is_passed_through() {
        let err = ApiError::from_status(401, Some(&json!({ "success": false, "message": "Identifiants invalides" })));
        assert_eq!(err.message, "Identifiants invalides");
        assert_eq!(err.status, Some(401));
        assert!(err.is_unauthorized());

        let err = ApiError::from_status(409, Some(&json!({ "error": "Stock insuffisant" })));
        assert_eq!(err.to_string(), "Stock insuffisant");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_status_without_payload_gets_generic_message() {
        let err = ApiError::from_status(502, None);
        assert_eq!(err.message, "La requête a échoué (HTTP 502)");
        assert!(!err.success);

        let err = ApiError::from_status(500, Some(&json!({ "message": "  " })));
        assert_eq!(err.message, "La requête a échoué (HTTP 500)");
    }

    #[test]
    fn test_rejected() {
        assert_eq!(ApiError::rejected(Some("Compte désactivé".into())).message, "Compte désactivé");
        assert_eq!(ApiError::rejected(None).message, REJECTED_MESSAGE);
        assert_eq!(ApiError::rejected(None).status, None);
    }

    #[test]
    fn test_envelope_defaults() {
        let env: ApiEnvelope<Vec<u32>> = serde_json::from_str(r#"{ "data": [1, 2] }"#).unwrap();
        assert!(env.success);
        assert_eq!(env.data, Some(vec![1, 2]));
        assert!(env.message.is_none());
    }
}
