//! Paginated response envelope
//!
//! ```
//! use keystone_pagination::Paginated;
//!
//! let page = Paginated::new(vec!["a", "b"], 5, 1, 2);
//! assert_eq!(page.pagination.total_pages, 3);
//! assert!(page.pagination.has_next_page);
//! ```
#![allow(clippy::must_use_candidate)]

use serde::{Deserialize, Serialize};

/// A page of items with metadata about the whole collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    /// `current_page` is 1-based
    pub fn new(items: Vec<T>, total_items: u64, current_page: u64, items_per_page: u64) -> Self {
        Self {
            items,
            pagination: Pagination::new(total_items, current_page, items_per_page),
        }
    }

    /// Transform the items, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Pagination {
    pub total_items: u64,
    pub current_page: u64,
    pub items_per_page: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub is_first_page: bool,
    pub is_last_page: bool,
}

impl Pagination {
    /// Compute the metadata; zero items per page yields zero pages
    pub const fn new(total_items: u64, current_page: u64, items_per_page: u64) -> Self {
        let total_pages = if items_per_page == 0 {
            0
        } else {
            total_items.div_ceil(items_per_page)
        };

        Self {
            total_items,
            current_page,
            items_per_page,
            total_pages,
            has_previous_page: current_page > 1,
            has_next_page: current_page < total_pages,
            is_first_page: current_page == 1,
            is_last_page: current_page == total_pages,
        }
    }
}
