//! HTTP client module
//!
//! The collaborator side of the pagination contract: one GET per page,
//! pagination headers turned into [`crate::pagination::ResponseMeta`].
//!
//! # Features
//!
//! - **Selector application**: offset (`page`, `per_page`) and keyset
//!   (cursor query parameters) on top of per-listing options
//! - **Error classification**: non-2xx status, timeouts, decode failures
//! - **Boxed fetchers**: `'static + Send` closures ready for the driver

mod client;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, PageFuture, DEFAULT_BASE_URL,
};
