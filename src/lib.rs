// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # gitlab-scan
//!
//! Lazy, strategy-agnostic pagination over the GitLab REST API (v4).
//!
//! GitLab list endpoints page their results in one of two ways: offset
//! pagination (`X-Next-Page` header) or keyset pagination (a `Link` header
//! with `rel="next"`). This crate hides the difference behind a single
//! stream of items that fetches the next page only when it is needed.
//!
//! ## Consumption idioms
//!
//! - [`scan`]: a stream of items plus a [`ScanOutcome`] reporting the error
//!   that ended the stream, checked after the stream is drained or dropped
//! - [`scan2`]: a stream of `Result<T>`, where an error is the last element
//! - [`scan_and_collect`]: every item, or the first error
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use gitlab_scan::api::{ListOptions, Projects};
//! use gitlab_scan::http::HttpClient;
//!
//! #[tokio::main]
//! async fn main() -> gitlab_scan::Result<()> {
//!     let projects = Projects::new(HttpClient::new()?);
//!     let list = projects.list(&ListOptions::new().keyset().per_page(50));
//!
//!     let (stream, outcome) = list.scan();
//!     let first_ten: Vec<_> = stream.take(10).collect().await;
//!     outcome.err()?;
//!
//!     println!("{} projects", first_ten.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  api: Projects / Issues  ->  List<T>                 │
//! ├──────────────────────────────────────────────────────┤
//! │  pagination: scan / scan2 / scan_and_collect         │
//! │              Pages (driver)  <-  NextPage descriptor │
//! ├──────────────────────────────────────────────────────┤
//! │  http: HttpClient::get_page (one GET per page)       │
//! └──────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Lazy page-by-page sequences
pub mod pagination;

/// HTTP client performing one request per page
pub mod http;

/// GitLab list endpoints
pub mod api;

/// Client settings
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use pagination::{
    scan, scan2, scan_and_collect, KeysetCursor, NextPage, Page, PageSelector, Pages, Scan,
    ScanOutcome,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
