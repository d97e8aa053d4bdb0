//! Common types used throughout gitlab-scan

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Ordered query parameters (GitLab accepts repeated keys, so not a map)
pub type QueryParams = Vec<(String, String)>;

// ============================================================================
// Sort Order
// ============================================================================

/// Sort direction for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending (GitLab's default for most listings)
    #[default]
    Desc,
}

impl SortOrder {
    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replace every pair whose key appears in `overrides`, then append the overrides
pub fn merge_query(base: &[(String, String)], overrides: &[(String, String)]) -> QueryParams {
    let mut merged: QueryParams = base
        .iter()
        .filter(|(key, _)| !overrides.iter().any(|(k, _)| k == key))
        .cloned()
        .collect();
    merged.extend(overrides.iter().cloned());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(raw: &[(&str, &str)]) -> QueryParams {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_sort_order_serde() {
        assert_eq!(serde_json::to_string(&SortOrder::Asc).unwrap(), "\"asc\"");
        let parsed: SortOrder = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(parsed, SortOrder::Desc);
        assert_eq!(SortOrder::default().to_string(), "desc");
    }

    #[test]
    fn test_merge_query_replaces_same_keys() {
        let base = pairs(&[("per_page", "20"), ("order_by", "id"), ("id_after", "1")]);
        let overrides = pairs(&[("id_after", "40"), ("sort", "asc")]);

        let merged = merge_query(&base, &overrides);

        assert_eq!(
            merged,
            pairs(&[
                ("per_page", "20"),
                ("order_by", "id"),
                ("id_after", "40"),
                ("sort", "asc")
            ])
        );
    }

    #[test]
    fn test_merge_query_without_overrides() {
        let base = pairs(&[("state", "opened")]);
        assert_eq!(merge_query(&base, &[]), base);
    }
}
