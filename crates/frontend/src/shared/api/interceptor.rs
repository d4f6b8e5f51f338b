//! Response-level session enforcement for the API client.

use contracts::shared::api::ApiError;
use contracts::shared::endpoints::is_login_endpoint;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// How long repeated 401s are folded into a single session teardown.
pub const UNAUTHORIZED_DEDUP_MS: u32 = 1_000;

/// A request that did not produce a 2xx response.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    Status { status: u16, payload: Option<Value> },
    Timeout,
    /// Transport error: no response was received.
    Network(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intercepted {
    pub error: ApiError,
    /// Clear the persisted session and send the user to login.
    pub expire_session: bool,
}

/// Normalizes a failure into the error pages see and decides whether it ends
/// the session.
///
/// A 401 on the login call is a wrong password, not an expired session. A 401
/// while the login page is already shown has nothing left to tear down.
pub fn intercept(request_path: &str, on_login_page: bool, failure: Failure) -> Intercepted {
    match failure {
        Failure::Status { status, payload } => {
            let error = ApiError::from_status(status, payload.as_ref());
            let expire_session =
                status == 401 && !is_login_endpoint(request_path) && !on_login_page;
            Intercepted {
                error,
                expire_session,
            }
        }
        Failure::Timeout => Intercepted {
            error: ApiError::timeout(),
            expire_session: false,
        },
        Failure::Network(detail) => {
            log::debug!("Transport error on {}: {}", request_path, detail);
            Intercepted {
                error: ApiError::network(),
                expire_session: false,
            }
        }
    }
}

/// What a finished exchange resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct Settled {
    pub result: Result<String, ApiError>,
    pub expire_session: bool,
}

/// Resolves a raw exchange outcome (status and body, or a failure).
///
/// A closed page (`cancelled`) always receives [`ApiError::cancelled`], but
/// the failure is classified first so a 401 still ends the session.
pub fn settle(
    request_path: &str,
    on_login_page: bool,
    outcome: Result<(u16, String), Failure>,
    cancelled: bool,
) -> Settled {
    let failure = match outcome {
        Ok((status, text)) if (200..300).contains(&status) => {
            return Settled {
                result: if cancelled { Err(ApiError::cancelled()) } else { Ok(text) },
                expire_session: false,
            };
        }
        Ok((status, text)) => Failure::Status {
            status,
            payload: serde_json::from_str::<Value>(&text).ok(),
        },
        Err(failure) => failure,
    };
    let Intercepted {
        error,
        expire_session,
    } = intercept(request_path, on_login_page, failure);
    Settled {
        result: Err(if cancelled { ApiError::cancelled() } else { error }),
        expire_session,
    }
}

/// Lets only the first of a burst of concurrent 401s trigger the redirect.
#[derive(Debug, Clone, Default)]
pub struct RedirectLatch(Arc<AtomicBool>);

impl RedirectLatch {
    /// `true` for the caller that armed the latch.
    pub fn try_acquire(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn release(&self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unauthorized() -> Failure {
        Failure::Status {
            status: 401,
            payload: Some(json!({ "success": false, "message": "Session expirée" })),
        }
    }

    #[test]
    fn test_401_on_regular_call_expires_session() {
        let out = intercept("/products", false, unauthorized());
        assert!(out.expire_session);
        assert!(out.error.is_unauthorized());
        assert_eq!(out.error.message, "Session expirée");
    }

    #[test]
    fn test_401_on_login_call_is_propagated_untouched() {
        let out = intercept(
            "/auth/login",
            false,
            Failure::Status {
                status: 401,
                payload: Some(json!({ "message": "Identifiants invalides" })),
            },
        );
        assert!(!out.expire_session);
        assert_eq!(out.error.message, "Identifiants invalides");
        assert_eq!(out.error.status, Some(401));
    }

    #[test]
    fn test_401_while_on_login_page_does_not_redirect() {
        let out = intercept("/auth/me", true, unauthorized());
        assert!(!out.expire_session);
        assert!(out.error.is_unauthorized());
    }

    #[test]
    fn test_timeout_is_normalized() {
        let out = intercept("/caisse", false, Failure::Timeout);
        assert!(!out.expire_session);
        assert_eq!(out.error.message, "request timed out");
        assert!(!out.error.success);
    }

    #[test]
    fn test_other_failures_keep_server_payload() {
        let out = intercept(
            "/stores",
            false,
            Failure::Status {
                status: 422,
                payload: Some(json!({ "message": "Quantité invalide" })),
            },
        );
        assert!(!out.expire_session);
        assert_eq!(out.error.message, "Quantité invalide");

        let out = intercept("/stores", false, Failure::Network("TypeError: Failed to fetch".into()));
        assert_eq!(out.error, ApiError::network());
    }

    #[test]
    fn test_settle_success() {
        let out = settle("/clients", false, Ok((200, "[]".into())), false);
        assert_eq!(out.result, Ok("[]".to_string()));
        assert!(!out.expire_session);

        let out = settle("/clients", false, Ok((204, String::new())), true);
        assert!(out.result.unwrap_err().is_cancelled());
    }

    #[test]
    fn test_settle_parses_error_body() {
        let body = r#"{"success":false,"message":"Stock insuffisant"}"#;
        let out = settle("/stores", false, Ok((409, body.into())), false);
        assert_eq!(out.result.unwrap_err().message, "Stock insuffisant");

        let out = settle("/stores", false, Ok((500, "<html>".into())), false);
        assert_eq!(out.result.unwrap_err().status, Some(500));
    }

    #[test]
    fn test_401_for_closed_page_still_expires_session() {
        let body = r#"{"message":"Session expirée"}"#;
        let out = settle("/clients", false, Ok((401, body.into())), true);
        assert!(out.expire_session);
        assert!(out.result.unwrap_err().is_cancelled());

        let out = settle("/auth/login", false, Ok((401, body.into())), true);
        assert!(!out.expire_session);
    }

    #[test]
    fn test_closed_page_hides_other_failures() {
        let out = settle("/caisse", false, Err(Failure::Timeout), true);
        assert!(!out.expire_session);
        assert!(out.result.unwrap_err().is_cancelled());
    }

    #[test]
    fn test_latch_lets_one_caller_through() {
        let latch = RedirectLatch::default();
        let other = latch.clone();
        assert!(latch.try_acquire());
        assert!(!other.try_acquire());
        assert!(!latch.try_acquire());
        other.release();
        assert!(latch.try_acquire());
    }
}
