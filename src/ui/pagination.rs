use std::ops::Range;

/// Fixed-size slicing of an already fetched list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total: usize,
    page_size: usize,
    current: usize,
}

impl Paginator {
    /// `page` is 1-based and clamped into the valid range.
    pub fn new(total: usize, page_size: usize, page: usize) -> Self {
        let page_size = page_size.max(1);
        let mut paginator = Self {
            total,
            page_size,
            current: 1,
        };
        paginator.current = paginator.clamp(page);
        paginator
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    fn clamp(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages().max(1))
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Index range of the current page within the full list.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current - 1) * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        &items[range.start.min(items.len())..range.end.min(items.len())]
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages()
    }

    /// Controls are only shown when there is more than one page.
    pub fn is_visible(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn go_to(&mut self, page: usize) {
        self.current = self.clamp(page);
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.current += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.has_prev() {
            self.current -= 1;
        }
    }

    pub fn page_info(&self) -> String {
        format!("Page {} of {}", self.current, self.total_pages())
    }

    /// One paginator per page, first to last.
    pub fn pages(&self) -> impl Iterator<Item = Paginator> + '_ {
        (1..=self.total_pages()).map(move |page| Self::new(self.total, self.page_size, page))
    }
}
