use serde::{Deserialize, Serialize};

/// Fixed page size of the public listing.
pub const PER_PAGE: u64 = 12;

/// Raw listing parameters exactly as they arrive on the query string.
///
/// Every field is kept as an optional string so that malformed values
/// degrade to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingParams {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
}

/// Ordering applied to the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Publication time, most recent first.
    #[default]
    Newest,
    /// Publication time, earliest first.
    Oldest,
    /// View count, highest first.
    Popular,
}

impl SortOrder {
    /// Parse a sort key; anything unrecognised means `Newest`.
    pub fn parse_lossy(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("oldest") => SortOrder::Oldest,
            Some("popular") => SortOrder::Popular,
            _ => SortOrder::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Popular => "popular",
        }
    }
}

/// Active, normalized filters. `None` means the filter is not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilters {
    /// Exact category slug.
    pub category: Option<String>,
    /// Exact tag slug.
    pub tag: Option<String>,
    /// Case-insensitive substring of title, excerpt or content.
    pub search: Option<String>,
}

/// A fully normalized listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub filters: ListingFilters,
    pub sort: SortOrder,
    /// 1-indexed page number.
    pub page: u64,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            filters: ListingFilters::default(),
            sort: SortOrder::Newest,
            page: 1,
        }
    }
}

impl ListingQuery {
    /// Normalize raw parameters: blank strings are dropped, unknown sort
    /// keys fall back to `newest` and invalid pages fall back to 1.
    pub fn from_params(params: &ListingParams) -> Self {
        Self {
            filters: ListingFilters {
                category: filled(params.category.as_deref()),
                tag: filled(params.tag.as_deref()),
                search: filled(params.search.as_deref()),
            },
            sort: SortOrder::parse_lossy(params.sort.as_deref()),
            page: params
                .page
                .as_deref()
                .and_then(|p| p.trim().parse::<u64>().ok())
                .filter(|p| *p >= 1)
                .unwrap_or(1),
        }
    }

    pub fn per_page(&self) -> u64 {
        PER_PAGE
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(PER_PAGE)
    }

    /// Query-string pairs that reproduce the active filter state.
    ///
    /// The default sort is omitted; `page` is left to the caller.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(category) = &self.filters.category {
            pairs.push(("category", category.as_str()));
        }
        if let Some(tag) = &self.filters.tag {
            pairs.push(("tag", tag.as_str()));
        }
        if let Some(search) = &self.filters.search {
            pairs.push(("search", search.as_str()));
        }
        if self.sort != SortOrder::Newest {
            pairs.push(("sort", self.sort.as_str()));
        }
        pairs
    }
}

fn filled(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(sort: Option<&str>, page: Option<&str>) -> ListingParams {
        ListingParams {
            sort: sort.map(String::from),
            page: page.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_sort_falls_back_to_newest() {
        assert_eq!(SortOrder::parse_lossy(None), SortOrder::Newest);
        assert_eq!(SortOrder::parse_lossy(Some("trending")), SortOrder::Newest);
        assert_eq!(SortOrder::parse_lossy(Some("oldest")), SortOrder::Oldest);
        assert_eq!(SortOrder::parse_lossy(Some("popular")), SortOrder::Popular);
    }

    #[test]
    fn test_blank_filters_are_dropped() {
        let query = ListingQuery::from_params(&ListingParams {
            category: Some("news".into()),
            tag: Some("".into()),
            search: Some("   ".into()),
            ..Default::default()
        });

        assert_eq!(query.filters.category.as_deref(), Some("news"));
        assert_eq!(query.filters.tag, None);
        assert_eq!(query.filters.search, None);
    }

    #[test]
    fn test_search_is_trimmed() {
        let query = ListingQuery::from_params(&ListingParams {
            search: Some("  Launch ".into()),
            ..Default::default()
        });

        assert_eq!(query.filters.search.as_deref(), Some("Launch"));
    }

    #[test]
    fn test_invalid_page_falls_back_to_first() {
        assert_eq!(ListingQuery::from_params(&params(None, None)).page, 1);
        assert_eq!(ListingQuery::from_params(&params(None, Some("0"))).page, 1);
        assert_eq!(ListingQuery::from_params(&params(None, Some("-3"))).page, 1);
        assert_eq!(ListingQuery::from_params(&params(None, Some("abc"))).page, 1);
        assert_eq!(ListingQuery::from_params(&params(None, Some("4"))).page, 4);
    }

    #[test]
    fn test_offset() {
        let query = ListingQuery::from_params(&params(None, Some("3")));
        assert_eq!(query.offset(), 24);
        assert_eq!(query.per_page(), 12);
    }

    #[test]
    fn test_query_pairs_omit_default_sort() {
        let query = ListingQuery::from_params(&ListingParams {
            category: Some("news".into()),
            search: Some("rust".into()),
            ..Default::default()
        });
        assert_eq!(query.query_pairs(), vec![("category", "news"), ("search", "rust")]);

        let popular = ListingQuery::from_params(&params(Some("popular"), None));
        assert_eq!(popular.query_pairs(), vec![("sort", "popular")]);
    }
}
