//! Pagination module
//!
//! Supports: offset (`X-Next-Page`) and keyset (`Link: rel="next"`)
//!
//! # Overview
//!
//! A listing endpoint is described by a fetcher: any
//! `FnMut(PageSelector) -> impl Future<Output = Result<Page<T>>>`. The driver
//! calls it with [`PageSelector::First`], derives a [`NextPage`] from the
//! returned [`ResponseMeta`], and keeps going until the server reports no
//! further page or a fetch fails. Callers never need to know which of the
//! two strategies an endpoint uses.
//!
//! Three ways to consume the result:
//!
//! | Function | Element | Error reporting |
//! |----------|---------|-----------------|
//! | [`scan`] | `T` | [`ScanOutcome::err`] after the stream ends |
//! | [`scan2`] | `Result<T>` | one trailing `Err` element |
//! | [`scan_and_collect`] | `Vec<T>` | `Err` instead of the list |

mod driver;
mod metadata;
mod scan;
mod types;

pub use driver::Pages;
pub use metadata::{
    parse_link_header, ResponseMeta, X_NEXT_PAGE, X_PAGE, X_PER_PAGE, X_PREV_PAGE, X_TOTAL,
    X_TOTAL_PAGES,
};
pub use scan::{scan, scan2, scan_and_collect, Scan, ScanOutcome};
pub use types::{KeysetCursor, NextPage, Page, PageSelector};
