//! Page arithmetic shared by listing queries.

/// Fixed page size for resource listings.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 15;

/// A 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// Number of rows preceding this page. Page 0 is treated as page 1.
    ///
    /// `None` when the offset does not fit in an SQL `i64`; such a page is
    /// past the end of any table.
    pub fn offset(&self) -> Option<usize> {
        let offset = (self.page.max(1) - 1).checked_mul(self.per_page)?;
        i64::try_from(offset).ok().map(|_| offset)
    }

    pub fn limit(&self) -> usize {
        self.per_page
    }
}

/// Number of pages needed for `total` rows; never less than one.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_one_page() {
        assert_eq!(total_pages(0, DEFAULT_ITEMS_PER_PAGE), 1);
    }

    #[test]
    fn rounds_partial_pages_up() {
        assert_eq!(total_pages(15, 15), 1);
        assert_eq!(total_pages(16, 15), 2);
        assert_eq!(total_pages(45, 15), 3);
    }

    #[test]
    fn page_zero_starts_at_first_row() {
        assert_eq!(Pagination::new(0, 15).offset(), Some(0));
        assert_eq!(Pagination::new(1, 15).offset(), Some(0));
        assert_eq!(Pagination::new(3, 15).offset(), Some(30));
    }

    #[test]
    fn huge_pages_have_no_offset() {
        assert_eq!(Pagination::new(usize::MAX, 15).offset(), None);
        assert_eq!(Pagination::new(1_000_000_000_000_000_000, 15).offset(), None);
        assert!(Pagination::new(1_000_000_000_000, 15).offset().is_some());
    }
}
