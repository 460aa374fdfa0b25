//! Listing vocabulary - filters, sort order, paging and the pagination contract.

mod pagination;
mod query;

pub use pagination::{PageLink, PageSlice, Paginated, last_page};
pub use query::{ListingFilters, ListingParams, ListingQuery, PER_PAGE, SortOrder};
