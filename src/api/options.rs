//! Options shared by list endpoints

use crate::types::{QueryParams, SortOrder};

/// Query options fixed for the duration of one listing
///
/// Keyset pagination needs an ordering field; when keyset mode is enabled
/// without one, `order_by=id` is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Page size
    pub per_page: Option<u32>,
    /// Ordering field
    pub order_by: Option<String>,
    /// Sort direction
    pub sort: Option<SortOrder>,
    /// Request keyset pagination (`pagination=keyset`)
    pub keyset: bool,
    /// Resource-specific filters
    pub params: QueryParams,
}

impl ListOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page size
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Set ordering field
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    /// Set sort direction
    #[must_use]
    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Switch to keyset pagination
    #[must_use]
    pub fn keyset(mut self) -> Self {
        self.keyset = true;
        self
    }

    /// Add a filter parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Render as query parameters
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();

        if self.keyset {
            query.push(("pagination".to_string(), "keyset".to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page".to_string(), per_page.to_string()));
        }
        match (&self.order_by, self.keyset) {
            (Some(field), _) => query.push(("order_by".to_string(), field.clone())),
            (None, true) => query.push(("order_by".to_string(), "id".to_string())),
            (None, false) => {}
        }
        if let Some(sort) = self.sort {
            query.push(("sort".to_string(), sort.to_string()));
        }
        query.extend(self.params.iter().cloned());

        query
    }
}
