//! Generic listing handle

use crate::error::Result;
use crate::http::{HttpClient, PageFuture};
use crate::pagination::{self, PageSelector, ScanOutcome};
use crate::types::QueryParams;
use futures::Stream;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// A listing endpoint with its query fixed
///
/// Creating a `List` performs no request; each consumption method starts a
/// fresh, independent sequence from the first page.
#[derive(Debug, Clone)]
pub struct List<T> {
    client: HttpClient,
    path: String,
    query: QueryParams,
    _marker: PhantomData<fn() -> T>,
}

impl<T> List<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Create a listing for `path` (relative to the client's base URL)
    pub fn new(client: HttpClient, path: impl Into<String>, query: QueryParams) -> Self {
        Self {
            client,
            path: path.into(),
            query,
            _marker: PhantomData,
        }
    }

    /// Request path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query sent with every page
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Page fetcher for this listing
    pub fn fetcher(&self) -> impl FnMut(PageSelector) -> PageFuture<T> + Send + 'static {
        self.client.fetcher(self.path.clone(), self.query.clone())
    }

    /// Items, with the terminating error reported by [`ScanOutcome::err`]
    pub fn scan(&self) -> (impl Stream<Item = T> + Send + Unpin, ScanOutcome) {
        pagination::scan(self.fetcher())
    }

    /// Items paired with errors
    pub fn scan2(&self) -> impl Stream<Item = Result<T>> + Send + Unpin {
        pagination::scan2(self.fetcher())
    }

    /// Every item, or the first error
    pub async fn collect(&self) -> Result<Vec<T>> {
        pagination::scan_and_collect(self.fetcher()).await
    }
}
