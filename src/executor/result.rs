//! Paging types for query execution

use crate::planner::SortSpec;

/// Zero-based page request with optional ordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number, starting at 0
    pub page: u32,
    /// Page size, at least 1
    pub size: u32,
    /// Sort keys in priority order
    pub sort: Vec<SortSpec>,
}

impl PageRequest {
    /// Creates a request for one page; a zero size is raised to 1
    pub fn of(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Vec::new(),
        }
    }

    pub fn with_sort(mut self, spec: SortSpec) -> Self {
        self.sort.push(spec);
        self
    }

    /// Number of rows skipped before this page
    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }
}

/// One page of results plus the total across all pages
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Rows on this page, in result order
    pub content: Vec<T>,
    /// Page number, starting at 0
    pub page: u32,
    /// Requested page size
    pub size: u32,
    /// Matching rows across all pages
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Slices an already filtered and sorted result into a page
    pub fn from_sorted(rows: Vec<T>, request: &PageRequest) -> Self {
        let total_elements = rows.len() as u64;
        let content = rows
            .into_iter()
            .skip(request.offset())
            .take(request.size as usize)
            .collect();
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.page) + 1 >= self.total_pages()
    }

    pub fn has_next(&self) -> bool {
        !self.is_last()
    }

    /// Returns the number of rows on this page
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
