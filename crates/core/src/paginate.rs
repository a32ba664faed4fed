//! Pagination engine.

use crate::{DirectoryError, DirectoryResult};
use std::num::NonZeroUsize;

/// Number of items per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Fixed(NonZeroUsize),
    /// Everything on one page.
    All,
}

impl PageSize {
    /// # Errors
    ///
    /// Returns `DirectoryError::InvalidInput` when `size` is zero.
    pub fn fixed(size: usize) -> DirectoryResult<Self> {
        NonZeroUsize::new(size)
            .map(PageSize::Fixed)
            .ok_or_else(|| DirectoryError::InvalidInput("page size must be greater than zero".into()))
    }

    fn resolve(self, len: usize) -> usize {
        match self {
            PageSize::Fixed(n) => n.get(),
            PageSize::All => len,
        }
    }
}

/// One window over a filtered collection.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
}

/// Cuts page `page` (1-based) out of `items`.
///
/// `total_pages` is zero for an empty input. A page outside `1..=total_pages` yields an empty
/// slice; resetting the page after a filter change is the caller's job.
pub fn paginate<T>(items: &[T], page_size: PageSize, page: usize) -> Page<'_, T> {
    let len = items.len();
    if len == 0 {
        return Page {
            items: &[],
            total_pages: 0,
        };
    }

    let size = page_size.resolve(len);
    let total_pages = len.div_ceil(size);

    let window = page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(size))
        .filter(|start| *start < len)
        .map(|start| &items[start..len.min(start.saturating_add(size))])
        .unwrap_or(&[]);

    Page {
        items: window,
        total_pages,
    }
}
