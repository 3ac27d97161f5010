//! In-memory search, filtering and pagination for dashboard lists.
//!
//! Every dashboard list fetches its whole collection once and narrows it
//! locally. Search is a case-insensitive substring match over a fixed set of
//! fields per entity; filters are exact (case-insensitive) matches on named
//! categorical values. Pagination is plain slice arithmetic over the
//! filtered result, preserving original order.

use std::collections::BTreeMap;

/// Default number of rows per dashboard page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter value that disables a filter, as sent by "All" dropdown options.
pub const FILTER_ALL: &str = "all";

/// An entity that can be searched and filtered in a dashboard list.
pub trait Searchable {
    /// Text fields matched against the search term.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of the categorical field named `key`, if this entity has one.
    fn filter_value(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Search term, filters and requested page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub filters: BTreeMap<String, String>,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    /// Whether `item` passes the search term and every active filter.
    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        self.matches_search(item) && self.matches_filters(item)
    }

    fn matches_search<T: Searchable>(&self, item: &T) -> bool {
        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        item.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    fn matches_filters<T: Searchable>(&self, item: &T) -> bool {
        self.filters.iter().all(|(key, wanted)| {
            if is_inactive_filter(wanted) {
                return true;
            }
            item.filter_value(key)
                .is_some_and(|value| value.eq_ignore_ascii_case(wanted.trim()))
        })
    }
}

fn is_inactive_filter(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(FILTER_ALL)
}

/// One page of a filtered list.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: Vec<&'a T>,
    /// The page actually shown, after clamping.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    /// True when nothing matched; drives the "no items" state.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Number of pages needed for `count` rows. Zero rows need zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Filter `items` by `query` and cut out the requested page.
///
/// The requested page is clamped to `1..=max(total_pages, 1)`.
pub fn paginate<'a, T: Searchable>(items: &'a [T], query: &ListQuery) -> Page<'a, T> {
    let page_size = query.page_size.max(1);
    let filtered: Vec<&T> = items.iter().filter(|item| query.matches(*item)).collect();
    let total_items = filtered.len();
    let total_pages = total_pages(total_items, page_size);
    let page = query.page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    Page {
        items: filtered[start..end].to_vec(),
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Query state owned by one list view.
///
/// Any change to the search term or a filter moves the view back to page 1,
/// because the filtered result it paginates over has changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    query: ListQuery,
}

impl ListState {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: ListQuery::with_page_size(page_size),
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.query.search {
            self.query.search = term;
            self.query.page = 1;
        }
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if self.query.filters.get(&key) != Some(&value) {
            self.query.filters.insert(key, value);
            self.query.page = 1;
        }
    }

    pub fn clear_filter(&mut self, key: &str) {
        if self.query.filters.remove(key).is_some() {
            self.query.page = 1;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.page = page.max(1);
    }

    pub fn page<'a, T: Searchable>(&self, items: &'a [T]) -> Page<'a, T> {
        paginate(items, &self.query)
    }
}
