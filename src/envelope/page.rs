//! Paginated results and the page counters sent with them

use serde::{Deserialize, Serialize};

/// One page of a larger result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index
    pub number: u32,
    /// Requested page size
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: u32, size: u32, total_elements: u64) -> Self {
        Self {
            content,
            number,
            size,
            total_elements,
        }
    }

    /// Number of pages; a zero page size counts as a single page
    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 1;
        }
        let pages = self.total_elements.div_ceil(u64::from(self.size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

/// Page counters carried in the envelope's `page` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// One-based page index
    pub current_page: u32,
    pub total_element: u64,
    pub size: u32,
    pub total_pages: u32,
}

impl PageInfo {
    pub fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            current_page: page.number.saturating_add(1),
            total_element: page.total_elements,
            size: page.size,
            total_pages: page.total_pages(),
        }
    }
}
