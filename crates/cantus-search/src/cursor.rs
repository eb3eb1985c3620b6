//! Fixed-size paging over a ranked result.
//!
//! The cursor remembers the signature of the last query it saw. A query with
//! a different signature starts again from the first page; the same query
//! keeps the current position.

use cantus_core::defaults::DEFAULT_PAGE_SIZE;
use cantus_core::model::QuerySignature;

/// Position of one session inside its current result list.
#[derive(Debug, Clone)]
pub struct PageCursor {
    offset: usize,
    page_size: usize,
    signature: Option<QuerySignature>,
}

impl PageCursor {
    /// A fresh cursor. A `page_size` of zero is treated as one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            offset: 0,
            page_size: page_size.max(1),
            signature: None,
        }
    }

    /// Start of the current window; always a multiple of the page size.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Record the signature of the query being evaluated, resetting the
    /// offset when it differs from the previous one. Returns `true` on reset.
    pub fn observe(&mut self, signature: QuerySignature) -> bool {
        if self.signature.as_ref() == Some(&signature) {
            return false;
        }
        self.reset();
        self.signature = Some(signature);
        true
    }

    /// Move to the next page of a result with `len` entries. Does nothing
    /// once the offset has reached the end. Returns `true` if it moved.
    pub fn advance(&mut self, len: usize) -> bool {
        if self.offset < len {
            self.offset += self.page_size;
            true
        } else {
            false
        }
    }

    /// Whether no entries remain at the current offset.
    #[must_use]
    pub const fn is_exhausted(&self, len: usize) -> bool {
        self.offset >= len
    }

    /// The current page of `items`, clipped to its length.
    #[must_use]
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        if self.offset >= items.len() {
            return &[];
        }
        let end = (self.offset + self.page_size).min(items.len());
        &items[self.offset..end]
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cantus_core::model::{AudioFeature, Query};

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_new_cursor_starts_at_zero() {
        let cursor = PageCursor::default();
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.page_size(), 6);
        assert_eq!(cursor.window(&items(10)), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_after_k_advances() {
        let data = items(14);
        let mut cursor = PageCursor::new(6);

        assert!(cursor.advance(data.len()));
        assert_eq!(cursor.window(&data), &[6, 7, 8, 9, 10, 11]);
        assert_eq!(cursor.offset(), 6);

        assert!(cursor.advance(data.len()));
        assert_eq!(cursor.window(&data), &[12, 13]);
        assert_eq!(cursor.offset(), 12);
    }

    #[test]
    fn test_advance_past_end_is_noop() {
        let data = items(7);
        let mut cursor = PageCursor::new(6);

        assert!(cursor.advance(data.len()));
        assert!(cursor.advance(data.len()));
        assert_eq!(cursor.offset(), 12);
        assert!(cursor.window(&data).is_empty());
        assert!(cursor.is_exhausted(data.len()));

        assert!(!cursor.advance(data.len()));
        assert!(!cursor.advance(data.len()));
        assert_eq!(cursor.offset(), 12);
    }

    #[test]
    fn test_exact_multiple_length() {
        let data = items(12);
        let mut cursor = PageCursor::new(6);
        cursor.advance(data.len());
        assert_eq!(cursor.window(&data).len(), 6);
        cursor.advance(data.len());
        assert!(cursor.window(&data).is_empty());
        assert!(!cursor.advance(data.len()));
    }

    #[test]
    fn test_empty_result() {
        let data: Vec<usize> = Vec::new();
        let mut cursor = PageCursor::new(6);
        assert!(cursor.window(&data).is_empty());
        assert!(!cursor.advance(data.len()));
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_observe_resets_on_change_only() {
        let data = items(30);
        let mut cursor = PageCursor::new(6);
        let query = Query::default();

        assert!(cursor.observe(query.signature()));
        cursor.advance(data.len());
        cursor.advance(data.len());
        assert_eq!(cursor.offset(), 12);

        assert!(!cursor.observe(query.signature()));
        assert_eq!(cursor.offset(), 12);

        let mut changed = query.clone();
        changed.features.set(AudioFeature::Tempo, 130.0);
        assert!(cursor.observe(changed.signature()));
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_zero_page_size_clamped() {
        let cursor = PageCursor::new(0);
        assert_eq!(cursor.page_size(), 1);
    }
}
