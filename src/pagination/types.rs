//! Pagination types
//!
//! Selectors tell a fetcher which page to load, descriptors tell the driver
//! how (and whether) to advance.

use super::metadata::ResponseMeta;
use std::fmt;
use url::{form_urlencoded, ParseError, Url};

/// Placeholder base used to resolve relative `Link` targets
const RELATIVE_BASE: &str = "http://relative.invalid/";

/// Which page a fetcher should load next
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelector {
    /// Start from the beginning, using only the options captured by the fetcher
    #[default]
    First,

    /// Offset pagination (`page` / `per_page`)
    Offset {
        /// 1-based page number
        page: u32,
        /// Page size echoed by the server, if any
        per_page: Option<u32>,
    },

    /// Keyset pagination, continuing from an opaque cursor
    Keyset(KeysetCursor),
}

impl PageSelector {
    /// Create an offset selector without an explicit page size
    pub fn offset(page: u32) -> Self {
        Self::Offset {
            page,
            per_page: None,
        }
    }

    /// Check if this selects the first page
    pub fn is_first(&self) -> bool {
        matches!(self, Self::First)
    }

    /// Query parameters this selector contributes to a request
    pub fn query_params(&self) -> Vec<(String, String)> {
        match self {
            Self::First => Vec::new(),
            Self::Offset { page, per_page } => {
                let mut params = vec![("page".to_string(), page.to_string())];
                if let Some(size) = per_page {
                    params.push(("per_page".to_string(), size.to_string()));
                }
                params
            }
            Self::Keyset(cursor) => cursor.params().to_vec(),
        }
    }
}

impl fmt::Display for PageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first page"),
            Self::Offset { page, .. } => write!(f, "page {page}"),
            Self::Keyset(cursor) => write!(f, "cursor {}", cursor.query_string()),
        }
    }
}

/// Continuation cursor for keyset pagination
///
/// Built from the target of a `Link: <...>; rel="next"` entry. The cursor
/// is the full set of query parameters of that link (`id_after`, `order_by`,
/// `sort`, filters, ...), so it is only meaningful for the query that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysetCursor {
    link: String,
    params: Vec<(String, String)>,
}

impl KeysetCursor {
    /// Parse a cursor from a link target
    ///
    /// Returns `None` when the link cannot be parsed or carries no query
    /// parameters, which callers treat as "no more pages".
    pub fn from_link(link: &str) -> Option<Self> {
        let link = link.trim();
        if link.is_empty() {
            return None;
        }

        let url = match Url::parse(link) {
            Ok(url) => url,
            Err(ParseError::RelativeUrlWithoutBase) => {
                Url::parse(RELATIVE_BASE).and_then(|base| base.join(link)).ok()?
            }
            Err(_) => return None,
        };

        let params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if params.is_empty() {
            return None;
        }

        Some(Self {
            link: link.to_string(),
            params,
        })
    }

    /// The link this cursor was extracted from
    pub fn link(&self) -> &str {
        &self.link
    }

    /// All query parameters carried by the cursor
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Look up a single parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The ordering field the cursor is relative to
    pub fn order_by(&self) -> Option<&str> {
        self.get("order_by")
    }

    /// Parameters re-encoded as a query string
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }
}

/// Parsed continuation metadata for one fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Another offset page exists
    Offset {
        /// Page number to request next
        page: u32,
        /// Page size of the current sequence, if the server reported it
        per_page: Option<u32>,
    },
    /// Another keyset page exists
    Keyset(KeysetCursor),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if another page exists
    pub fn has_next(&self) -> bool {
        !self.is_done()
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Selector for the following fetch, or `None` when exhausted
    pub fn into_selector(self) -> Option<PageSelector> {
        match self {
            Self::Offset { page, per_page } => Some(PageSelector::Offset { page, per_page }),
            Self::Keyset(cursor) => Some(PageSelector::Keyset(cursor)),
            Self::Done => None,
        }
    }
}

impl fmt::Display for NextPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset { page, .. } => write!(f, "page {page}"),
            Self::Keyset(cursor) => write!(f, "cursor {}", cursor.query_string()),
            Self::Done => write!(f, "done"),
        }
    }
}

/// One page of items together with the metadata of the response it came from
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Pagination metadata
    pub meta: ResponseMeta,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::last(Vec::new())
    }
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, meta: ResponseMeta) -> Self {
        Self { items, meta }
    }

    /// Create a page with no continuation
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            meta: ResponseMeta::default(),
        }
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Continuation derived from the page metadata
    pub fn next_page(&self) -> NextPage {
        self.meta.descriptor()
    }
}
