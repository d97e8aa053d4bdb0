//! Response metadata and continuation extraction
//!
//! GitLab reports offset pagination through `X-*` headers and keyset
//! pagination through the `Link` header. Both are captured in
//! [`ResponseMeta`]; [`ResponseMeta::descriptor`] decides which one applies.

use super::types::{KeysetCursor, NextPage};
use reqwest::header::{HeaderMap, LINK};
use std::str::FromStr;
use tracing::trace;

/// Total number of items
pub const X_TOTAL: &str = "x-total";
/// Total number of pages
pub const X_TOTAL_PAGES: &str = "x-total-pages";
/// Page size
pub const X_PER_PAGE: &str = "x-per-page";
/// Current page number
pub const X_PAGE: &str = "x-page";
/// Next page number
pub const X_NEXT_PAGE: &str = "x-next-page";
/// Previous page number
pub const X_PREV_PAGE: &str = "x-prev-page";

/// Pagination metadata of a single response
///
/// Numeric fields are `0` when the header was absent or unparseable,
/// link fields are `None` when the relation was not present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    pub total_items: u64,
    pub total_pages: u32,
    pub items_per_page: u32,
    pub current_page: u32,
    pub next_page: u32,
    pub previous_page: u32,

    pub first_link: Option<String>,
    pub previous_link: Option<String>,
    pub next_link: Option<String>,
    pub last_link: Option<String>,
}

impl ResponseMeta {
    /// Create empty metadata (no continuation)
    pub fn new() -> Self {
        Self::default()
    }

    /// Read pagination headers from a response
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut meta = Self {
            total_items: header_number(headers, X_TOTAL),
            total_pages: header_number(headers, X_TOTAL_PAGES),
            items_per_page: header_number(headers, X_PER_PAGE),
            current_page: header_number(headers, X_PAGE),
            next_page: header_number(headers, X_NEXT_PAGE),
            previous_page: header_number(headers, X_PREV_PAGE),
            ..Self::default()
        };

        for value in headers.get_all(LINK) {
            let Ok(value) = value.to_str() else {
                trace!("ignoring non-ASCII Link header");
                continue;
            };
            for (rel, target) in parse_link_header(value) {
                meta.set_link(&rel, target);
            }
        }

        meta
    }

    /// Set the next page number
    #[must_use]
    pub fn with_next_page(mut self, page: u32) -> Self {
        self.next_page = page;
        self
    }

    /// Set the current page number and page size
    #[must_use]
    pub fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.current_page = page;
        self.items_per_page = per_page;
        self
    }

    /// Set the `rel="next"` link
    #[must_use]
    pub fn with_next_link(mut self, link: impl Into<String>) -> Self {
        self.next_link = Some(link.into());
        self
    }

    fn set_link(&mut self, rel: &str, target: String) {
        match rel {
            "first" => self.first_link = Some(target),
            "prev" | "previous" => self.previous_link = Some(target),
            "next" => self.next_link = Some(target),
            "last" => self.last_link = Some(target),
            other => trace!(rel = other, "ignoring unknown link relation"),
        }
    }

    /// Derive the continuation for the page this metadata belongs to
    ///
    /// A non-zero `X-Next-Page` wins; otherwise a parseable `rel="next"`
    /// link continues with keyset pagination. Anything else, including a
    /// malformed link, ends the sequence.
    pub fn descriptor(&self) -> NextPage {
        if self.next_page > 0 {
            let per_page = (self.items_per_page > 0).then_some(self.items_per_page);
            return NextPage::Offset {
                page: self.next_page,
                per_page,
            };
        }

        if let Some(link) = &self.next_link {
            if let Some(cursor) = KeysetCursor::from_link(link) {
                return NextPage::Keyset(cursor);
            }
            trace!(link = %link, "next link carries no usable cursor");
        }

        NextPage::Done
    }
}

fn header_number<N: FromStr + Default>(headers: &HeaderMap, name: &str) -> N {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_default()
}

/// Parse a Link header into `(rel, target)` pairs
///
/// Format: `<url>; rel="next", <url>; rel="prev"`. Entries without both a
/// target and a relation are skipped. A space-separated relation list
/// produces one pair per relation.
pub fn parse_link_header(header: &str) -> Vec<(String, String)> {
    let mut links = Vec::new();

    for part in split_link_entries(header) {
        let mut target = None;
        let mut rels = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if let Some(inner) = segment
                .strip_prefix('<')
                .and_then(|s| s.strip_suffix('>'))
            {
                target = Some(inner.trim());
            } else if let Some(value) = segment.strip_prefix("rel") {
                if let Some(value) = value.trim_start().strip_prefix('=') {
                    rels = Some(value.trim().trim_matches('"').trim_matches('\''));
                }
            }
        }

        match (target, rels) {
            (Some(t), Some(r)) if !t.is_empty() => {
                for rel in r.split_whitespace() {
                    links.push((rel.to_ascii_lowercase(), t.to_string()));
                }
            }
            _ => trace!(entry = part.trim(), "skipping malformed link entry"),
        }
    }

    links
}

/// Split a Link header on the commas that separate entries
///
/// Commas inside `<...>` belong to the target URL.
fn split_link_entries(header: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in header.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&header[start..]);

    entries
}
