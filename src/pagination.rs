//! This module defines the common functionality for paging data.

/// The config that controls how to display pages of data.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum number of records to display per page.
    pub page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            page_size: 6,
        }
    }
}

/// One page of an ordered collection plus the metadata needed to render
/// next/previous controls.
#[derive(Debug, PartialEq)]
pub(crate) struct Page<T> {
    /// The records on this page, in the order they were given.
    pub(crate) items: Vec<T>,
    /// The 1-based page number after clamping.
    pub(crate) number: u64,
    /// The total number of pages. Always at least 1, even for an empty
    /// collection.
    pub(crate) page_count: u64,
}

impl<T> Page<T> {
    pub(crate) fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub(crate) fn has_next(&self) -> bool {
        self.number < self.page_count
    }

    pub(crate) fn previous_number(&self) -> u64 {
        self.number - 1
    }

    pub(crate) fn next_number(&self) -> u64 {
        self.number + 1
    }
}

/// Slice `items` into the requested page.
///
/// A missing or zero `requested_page` falls back to the configured default.
/// Page numbers past the end clamp to the last page rather than erroring.
pub(crate) fn paginate<T>(
    items: Vec<T>,
    requested_page: Option<u64>,
    config: &PaginationConfig,
) -> Page<T> {
    let page_size = config.page_size.max(1);
    let page_count = (items.len() as u64).div_ceil(page_size).max(1);

    let number = requested_page
        .filter(|&page| page >= 1)
        .unwrap_or(config.default_page)
        .min(page_count);

    let first_index = (number - 1) * page_size;
    let items = items
        .into_iter()
        .skip(first_index as usize)
        .take(page_size as usize)
        .collect();

    Page {
        items,
        number,
        page_count,
    }
}
