//! The single HTTP entry point of the console.
//!
//! Every request carries the session cookie (`credentials: include`) and a
//! timeout. Failures go through [`intercept`] so pages always receive an
//! [`ApiError`], and an expired session is torn down here rather than in pages.

use contracts::shared::api::ApiError;
use futures::future::{select, Either};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::use_context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use web_sys::{AbortController, RequestCredentials};

use super::cancel::CancelToken;
use super::interceptor::{settle, Failure, RedirectLatch, UNAUTHORIZED_DEDUP_MS};
use crate::routes::paths::is_login_path;
use crate::shared::config::ClientConfig;
use crate::system::auth::context::AuthContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Overrides the configured request timeout.
    pub timeout_ms: Option<u32>,
    pub cancel: Option<CancelToken>,
}

impl RequestOptions {
    pub fn timeout(ms: u32) -> Self {
        Self {
            timeout_ms: Some(ms),
            cancel: None,
        }
    }

    pub fn cancellable(token: &CancelToken) -> Self {
        Self {
            timeout_ms: None,
            cancel: Some(token.clone()),
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    auth: AuthContext,
    latch: RedirectLatch,
}

impl ApiClient {
    pub fn new(config: ClientConfig, auth: AuthContext) -> Self {
        Self {
            config: Arc::new(config),
            auth,
            latch: RedirectLatch::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let text = self.send(Method::Get, path, None, options).await?;
        decode_body(&text)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_string(body).map_err(ApiError::decode)?;
        let text = self.send(Method::Post, path, Some(body), options).await?;
        decode_body(&text)
    }

    /// POST without a body; the response body is ignored.
    pub async fn post_empty(&self, path: &str, options: RequestOptions) -> Result<(), ApiError> {
        self.send(Method::Post, path, None, options).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<(), ApiError> {
        self.send(Method::Delete, path, None, options).await.map(|_| ())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        options: RequestOptions,
    ) -> Result<String, ApiError> {
        let url = self.config.url(path);
        let timeout_ms = options.timeout_ms.unwrap_or(self.config.request_timeout_ms);
        let controller = AbortController::new().ok();
        let signal = controller.as_ref().map(AbortController::signal);

        let builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Delete => Request::delete(&url),
        }
        .credentials(RequestCredentials::Include)
        .header("Accept", "application/json")
        .abort_signal(signal.as_ref());

        let request = build_request(builder, body)
            .map_err(|e| ApiError::decode(format!("cannot build request: {}", e)))?;

        log::debug!("{:?} {}", method, path);
        let exchange = async move {
            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, gloo_net::Error>((status, text))
        };

        let outcome = match select(Box::pin(exchange), TimeoutFuture::new(timeout_ms)).await {
            Either::Left((result, _)) => result.map_err(|e| Failure::Network(e.to_string())),
            Either::Right(_) => {
                if let Some(controller) = &controller {
                    controller.abort();
                }
                log::warn!("{:?} {} timed out after {} ms", method, path, timeout_ms);
                Err(Failure::Timeout)
            }
        };

        let cancelled = options.cancel.as_ref().is_some_and(CancelToken::is_cancelled);
        let settled = settle(path, on_login_page(), outcome, cancelled);
        if settled.expire_session {
            self.expire_session(path);
        }
        if cancelled {
            log::debug!("Dropping response of {} for a closed page", path);
        }
        settled.result
    }

    /// Clears the persisted record on every 401; the in-memory teardown (which
    /// makes the guard redirect to login) runs once per burst.
    fn expire_session(&self, path: &str) {
        if !self.auth.expire(&self.latch) {
            return;
        }
        log::warn!("Session rejected by the server on {}, logged out", path);
        let latch = self.latch.clone();
        Timeout::new(UNAUTHORIZED_DEDUP_MS, move || latch.release()).forget();
    }
}

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient not provided by App")
}

fn build_request(builder: RequestBuilder, body: Option<String>) -> Result<Request, gloo_net::Error> {
    match body {
        Some(body) => builder.header("Content-Type", "application/json").body(body),
        None => builder.build(),
    }
}

fn on_login_page() -> bool {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .is_some_and(|path| is_login_path(&path))
}

/// Parses a response body; an empty body reads as JSON `null`.
pub fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let result = if text.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(text)
    };
    result.map_err(ApiError::decode)
}
