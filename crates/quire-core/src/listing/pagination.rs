use serde::Serialize;

use super::query::ListingQuery;

/// Pages shown on each side of the current page in a long link window.
const ON_EACH_SIDE: u64 = 3;

const PREVIOUS_LABEL: &str = "« Previous";
const NEXT_LABEL: &str = "Next »";
const ELLIPSIS_LABEL: &str = "...";

/// One window of matched rows plus the size of the whole match set.
#[derive(Debug, Clone)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// A navigation control. A `None` url renders as disabled or as an ellipsis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub url: Option<String>,
    pub label: String,
    pub active: bool,
}

impl PageLink {
    fn page(url: String, page: u64, current: u64) -> Self {
        Self {
            url: Some(url),
            label: page.to_string(),
            active: page == current,
        }
    }

    fn ellipsis() -> Self {
        Self {
            url: None,
            label: ELLIPSIS_LABEL.to_string(),
            active: false,
        }
    }
}

/// One page of results with the metadata needed to render pagination.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
    /// 1-based position of the first item on this page.
    pub from: Option<u64>,
    /// 1-based position of the last item on this page.
    pub to: Option<u64>,
    pub links: Vec<PageLink>,
}

impl<T> Paginated<T> {
    /// Build pagination for `data`, the rows of `query.page`, out of `total`
    /// matches. Link urls point at `path` and keep the active filters.
    pub fn new(data: Vec<T>, total: u64, query: &ListingQuery, path: &str) -> Self {
        let current = query.page;
        let per_page = query.per_page();
        let last = last_page(total, per_page);

        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            let from = query.offset() + 1;
            (Some(from), Some(from + data.len() as u64 - 1))
        };

        let url = |page: u64| page_url(path, query, page);

        let mut links = Vec::new();
        links.push(PageLink {
            url: (current > 1).then(|| url(current - 1)),
            label: PREVIOUS_LABEL.to_string(),
            active: false,
        });
        for entry in page_window(current, last) {
            links.push(match entry {
                Some(page) => PageLink::page(url(page), page, current),
                None => PageLink::ellipsis(),
            });
        }
        links.push(PageLink {
            url: (current < last).then(|| url(current + 1)),
            label: NEXT_LABEL.to_string(),
            active: false,
        });

        Self {
            data,
            current_page: current,
            last_page: last,
            per_page,
            total,
            from,
            to,
            links,
        }
    }

    /// Convert the page items while keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            current_page: self.current_page,
            last_page: self.last_page,
            per_page: self.per_page,
            total: self.total,
            from: self.from,
            to: self.to,
            links: self.links,
        }
    }
}

/// Last page number for `total` rows; an empty set still has page 1.
pub fn last_page(total: u64, per_page: u64) -> u64 {
    total.div_ceil(per_page).max(1)
}

/// Page numbers to render, `None` marking an ellipsis.
fn page_window(current: u64, last: u64) -> Vec<Option<u64>> {
    let range = |from: u64, to: u64| (from..=to).map(Some);

    if last < ON_EACH_SIDE * 2 + 8 {
        return range(1, last).collect();
    }

    let window = ON_EACH_SIDE + 4;
    let mut pages = Vec::new();

    if current <= window {
        pages.extend(range(1, window + ON_EACH_SIDE));
        pages.push(None);
        pages.extend(range(last - 1, last));
    } else if current > last - window {
        pages.extend(range(1, 2));
        pages.push(None);
        pages.extend(range(last - (window + ON_EACH_SIDE - 1), last));
    } else {
        pages.extend(range(1, 2));
        pages.push(None);
        pages.extend(range(current - ON_EACH_SIDE, current + ON_EACH_SIDE));
        pages.push(None);
        pages.extend(range(last - 1, last));
    }

    pages
}

fn page_url(path: &str, query: &ListingQuery, page: u64) -> String {
    let mut url = format!("{path}?");
    for (key, value) in query.query_pairs() {
        url.push_str(&format!("{key}={}&", urlencoding::encode(value)));
    }
    url.push_str(&format!("page={page}"));
    url
}
