//! Page arithmetic for post listings.

/// Posts per page when no page size is configured.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Returns `None` for page 0 or a zero page size.
    pub fn new(page: u64, page_size: u64) -> Option<Self> {
        (page >= 1 && page_size >= 1).then_some(Self { page, page_size })
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

/// Number of the last page, `ceil(total / page_size)`. Zero when nothing matches.
pub fn last_page(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_page_zero() {
        assert!(PageRequest::new(0, 10).is_none());
        assert!(PageRequest::new(1, 0).is_none());
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 10).unwrap().offset(), 0);
        assert_eq!(PageRequest::new(3, 10).unwrap().offset(), 20);
    }

    #[test]
    fn test_last_page() {
        assert_eq!(last_page(0, 10), 0);
        assert_eq!(last_page(10, 10), 1);
        assert_eq!(last_page(11, 10), 2);
        assert_eq!(last_page(25, DEFAULT_PAGE_SIZE), 3);
    }
}
