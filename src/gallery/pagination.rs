//! Reveal-limit pagination over the ordered view.

/// Default number of items revealed per page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Partition of an ordered view into visible and hidden-but-retained items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal<'a, T> {
    pub visible: &'a [T],
    /// Matching items beyond the reveal limit. Marked hidden, never removed.
    pub hidden: &'a [T],
    pub has_more: bool,
}

/// Tracks how many items of the ordered view are currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    reveal_limit: usize,
}

impl Pagination {
    /// Creates a controller at the first page. A zero page size is bumped to one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            reveal_limit: page_size,
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn reveal_limit(&self) -> usize {
        self.reveal_limit
    }

    /// Splits `view` at the reveal limit.
    ///
    /// ```
    /// use marquee::gallery::Pagination;
    ///
    /// let pagination = Pagination::new(2);
    /// let reveal = pagination.reveal(&[10, 11, 12]);
    /// assert_eq!(reveal.visible, &[10, 11]);
    /// assert_eq!(reveal.hidden, &[12]);
    /// assert!(reveal.has_more);
    /// ```
    #[must_use]
    pub fn reveal<'a, T>(&self, view: &'a [T]) -> Reveal<'a, T> {
        let cut = self.reveal_limit.min(view.len());
        let (visible, hidden) = view.split_at(cut);
        Reveal {
            visible,
            hidden,
            has_more: view.len() > self.reveal_limit,
        }
    }

    /// Back to the first page. Called on every criteria change.
    pub fn reset_page(&mut self) {
        self.reveal_limit = self.page_size;
    }

    /// Reveals one more page. Filters are untouched.
    pub fn advance_page(&mut self) {
        self.reveal_limit = self.reveal_limit.saturating_add(self.page_size);
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_respects_limit() {
        let view: Vec<usize> = (0..30).collect();
        let pagination = Pagination::default();
        let reveal = pagination.reveal(&view);
        assert_eq!(reveal.visible.len(), 12);
        assert_eq!(reveal.hidden.len(), 18);
        assert!(reveal.has_more);
    }

    #[test]
    fn exact_fit_has_no_more() {
        let view: Vec<usize> = (0..12).collect();
        let reveal = Pagination::default().reveal(&view);
        assert_eq!(reveal.visible.len(), 12);
        assert!(reveal.hidden.is_empty());
        assert!(!reveal.has_more);
    }

    #[test]
    fn short_and_empty_views() {
        let pagination = Pagination::new(5);
        let reveal = pagination.reveal(&[1, 2]);
        assert_eq!(reveal.visible, &[1, 2]);
        assert!(!reveal.has_more);

        let empty: [u8; 0] = [];
        let reveal = pagination.reveal(&empty);
        assert!(reveal.visible.is_empty());
        assert!(!reveal.has_more);
    }

    #[test]
    fn advance_and_reset() {
        let mut pagination = Pagination::new(12);
        pagination.advance_page();
        pagination.advance_page();
        assert_eq!(pagination.reveal_limit(), 36);

        pagination.reset_page();
        assert_eq!(pagination.reveal_limit(), 12);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let pagination = Pagination::new(0);
        assert_eq!(pagination.page_size(), 1);
        assert_eq!(pagination.reveal(&[1, 2]).visible, &[1]);
    }
}
