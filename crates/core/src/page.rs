//! One page of an ordered collection plus count metadata.

/// A bounded, offset-selected slice of an ordered collection.
///
/// `current_page` and `page_size` are always at least 1, so
/// `total_pages` is well defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageList<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

impl<T> PageList<T> {
    /// Cut page `page_number` (1-based) of `page_size` items out of `source`.
    ///
    /// Both arguments are clamped to at least 1.
    pub fn slice<'a, I>(source: I, total_count: u64, page_number: u32, page_size: u32) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: Clone + 'a,
    {
        let current_page = page_number.max(1);
        let page_size = page_size.max(1);
        let skip = (u64::from(current_page) - 1) * u64::from(page_size);

        let items = source
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(page_size as usize)
            .cloned()
            .collect();

        Self {
            items,
            current_page,
            page_size,
            total_count,
            total_pages: total_count.div_ceil(u64::from(page_size)),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.current_page) < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn page_of(total: u32, number: u32, size: u32) -> PageList<u32> {
        let source: Vec<u32> = (0..total).collect();
        PageList::slice(source.iter(), u64::from(total), number, size)
    }

    #[test]
    fn empty_source_has_no_pages() {
        let page = page_of(0, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn middle_page_links_both_ways() {
        let page = page_of(25, 2, 10);
        assert_eq!(page.items, (10..20).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert!(page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn zero_arguments_are_clamped() {
        let page = page_of(5, 0, 0);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.items, vec![0]);
        assert_eq!(page.total_pages, 5);
    }

    proptest! {
        #[test]
        fn page_arithmetic_holds(total in 0u32..200, number in 1u32..30, size in 1u32..25) {
            let page = page_of(total, number, size);

            let offset = i64::from(number - 1) * i64::from(size);
            let expected_len = i64::from(size).min((i64::from(total) - offset).max(0));
            prop_assert_eq!(page.items.len() as i64, expected_len);
            prop_assert_eq!(page.total_pages, u64::from(total).div_ceil(u64::from(size)));
            prop_assert_eq!(page.has_next(), u64::from(number) < page.total_pages);
            prop_assert_eq!(page.has_previous(), number > 1);
        }
    }
}
