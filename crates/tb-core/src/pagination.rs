//! Page arithmetic for record listings.

use crate::{Error, Result};

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Create a page request. Both `page` and `size` must be at least 1.
    pub fn new(page: usize, size: usize) -> Result<Self> {
        if page == 0 {
            return Err(Error::Validation("page must be at least 1".into()));
        }
        if size == 0 {
            return Err(Error::Validation("size must be at least 1".into()));
        }
        Ok(Self { page, size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the first record on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.size)
    }

    /// Slice `[offset, offset + size)` out of `records`, clamped to its length.
    pub fn slice<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        let start = self.offset().min(records.len());
        let end = start.saturating_add(self.size).min(records.len());
        &records[start..end]
    }

    /// Cut this page out of `records` and wrap it with the totals.
    pub fn paginate<T: Clone>(&self, records: &[T]) -> Page<T> {
        Page {
            items: self.slice(records).to_vec(),
            page: self.page,
            size: self.size,
            total: records.len(),
            total_pages: total_pages(records.len(), self.size),
        }
    }
}

/// `ceil(total / size)`; zero records means zero pages.
pub fn total_pages(total: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size)
}

/// One page of records plus the counts a paginated UI needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total: usize,
    pub total_pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let req = PageRequest::default();
        assert_eq!(req.page(), 1);
        assert_eq!(req.size(), 4);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn zero_is_rejected() {
        assert!(matches!(PageRequest::new(0, 4), Err(Error::Validation(_))));
        assert!(matches!(PageRequest::new(1, 0), Err(Error::Validation(_))));
    }

    #[test]
    fn slices_middle_and_last_page() {
        let records: Vec<u32> = (1..=10).collect();
        assert_eq!(PageRequest::new(2, 4).unwrap().slice(&records), &[5, 6, 7, 8]);
        assert_eq!(PageRequest::new(3, 4).unwrap().slice(&records), &[9, 10]);
    }

    #[test]
    fn out_of_range_is_empty() {
        let records: Vec<u32> = (1..=3).collect();
        assert!(PageRequest::new(5, 4).unwrap().slice(&records).is_empty());
        assert!(PageRequest::new(usize::MAX, usize::MAX)
            .unwrap()
            .slice(&records)
            .is_empty());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 4), 0);
        assert_eq!(total_pages(4, 4), 1);
        assert_eq!(total_pages(5, 4), 2);
        assert_eq!(total_pages(9, 3), 3);
    }

    #[test]
    fn pages_reconstruct_everything_once() {
        let records: Vec<u32> = (1..=11).collect();
        for size in 1..=12 {
            let pages = total_pages(records.len(), size);
            let mut seen = Vec::new();
            for page in 1..=pages + 1 {
                let slice = PageRequest::new(page, size).unwrap().slice(&records);
                assert!(slice.len() <= size);
                seen.extend_from_slice(slice);
            }
            assert_eq!(seen, records, "size {size}");
        }
    }

    #[test]
    fn paginate_carries_totals() {
        let records = vec!["a", "b", "c", "d", "e"];
        let page = PageRequest::new(2, 2).unwrap().paginate(&records);
        assert_eq!(page.items, vec!["c", "d"]);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
    }
}
