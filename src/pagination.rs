use std::ops::Range;

use serde::Serialize;

/// Number of pages needed for `total` items; never less than one.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1)).max(1)
}

/// Index range of page `page` (1-based) clipped to `total` items.
fn page_bounds(total: usize, page: usize, per_page: usize) -> Range<usize> {
    let per_page = per_page.max(1);
    let start = page
        .saturating_sub(1)
        .saturating_mul(per_page)
        .min(total);
    let end = start.saturating_add(per_page).min(total);
    start..end
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T: Clone> Paginated<T> {
    /// Slices one page out of `items`. A page past the end is empty.
    pub fn paginate(items: &[T], page: usize, per_page: usize) -> Self {
        let page = if page == 0 { 1 } else { page };
        let total = items.len();

        Self {
            items: items[page_bounds(total, page, per_page)].to_vec(),
            page,
            per_page: per_page.max(1),
            total,
            total_pages: total_pages(total, per_page),
        }
    }
}

impl<T> Paginated<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_of_twenty_five() {
        let items: Vec<usize> = (0..25).collect();

        let first = Paginated::paginate(&items, 1, 10);
        assert_eq!(first.items, (0..10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = Paginated::paginate(&items, 3, 10);
        assert_eq!(last.items, (20..25).collect::<Vec<_>>());
        assert!(!last.has_next());

        let beyond = Paginated::paginate(&items, 4, 10);
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 25);
    }

    #[test]
    fn empty_input_has_one_page() {
        let items: Vec<u8> = Vec::new();
        let page = Paginated::paginate(&items, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let items = [1, 2, 3];
        let page = Paginated::paginate(&items, usize::MAX, 10);
        assert!(page.items.is_empty());
    }
}
