pub mod cancel;
pub mod client;
pub mod interceptor;

pub use cancel::CancelToken;
pub use client::{use_api, ApiClient, RequestOptions};
