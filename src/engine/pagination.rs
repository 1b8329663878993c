//! Cursor pagination arithmetic.
//!
//! A page is planned against a `total` counted under the same predicate that
//! later fetches it; `next_offset` never passes `total`.

use serde::Serialize;
use thiserror::Error;

use crate::domain::Filter;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("offset must be non-negative, got {0}")]
    NegativeOffset(i64),
    #[error("count must be positive, got {0}")]
    NonPositiveCount(i64),
    #[error("offset {offset} is beyond total {total}")]
    OffsetBeyondTotal { offset: i64, total: i64 },
}

/// A validated `(offset, count)` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    offset: i64,
    count: i64,
}

/// What to do for a page once the total is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePlan {
    /// Nothing left to fetch; the cursor is terminal.
    Exhausted { next_offset: i64 },
    Fetch { offset: i64, limit: i64 },
}

impl PageRequest {
    pub fn new(offset: i64, count: i64) -> Result<Self, PageError> {
        if offset < 0 {
            return Err(PageError::NegativeOffset(offset));
        }
        if count <= 0 {
            return Err(PageError::NonPositiveCount(count));
        }
        Ok(PageRequest { offset, count })
    }

    /// First page of `count` items.
    pub fn first(count: i64) -> Result<Self, PageError> {
        Self::new(0, count)
    }

    pub fn plan(&self, total: i64) -> Result<PagePlan, PageError> {
        if total == 0 {
            return Ok(PagePlan::Exhausted { next_offset: 0 });
        }
        if self.offset > total {
            return Err(PageError::OffsetBeyondTotal {
                offset: self.offset,
                total,
            });
        }
        if self.offset == total {
            return Ok(PagePlan::Exhausted { next_offset: total });
        }
        Ok(PagePlan::Fetch {
            offset: self.offset,
            limit: self.count,
        })
    }
}

pub fn next_offset(offset: i64, fetched: usize, total: i64) -> i64 {
    (offset + fetched as i64).min(total)
}

/// One page of a filtered listing. `next_offset == total` marks the end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor<T> {
    pub total: i64,
    pub items: Vec<T>,
    pub next_offset: i64,
    pub filter: Filter,
}

impl<T> Cursor<T> {
    pub fn exhausted(total: i64, next_offset: i64, filter: Filter) -> Self {
        Cursor {
            total,
            items: Vec::new(),
            next_offset,
            filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert_eq!(PageRequest::new(-1, 10), Err(PageError::NegativeOffset(-1)));
        assert_eq!(PageRequest::new(0, 0), Err(PageError::NonPositiveCount(0)));
        assert!(PageRequest::new(0, 1).is_ok());
    }

    #[test]
    fn test_empty_total_is_terminal_at_zero() {
        let page = PageRequest::new(5, 10).unwrap();
        assert_eq!(page.plan(0), Ok(PagePlan::Exhausted { next_offset: 0 }));
    }

    #[test]
    fn test_offset_at_total_is_empty_page() {
        let page = PageRequest::new(12, 10).unwrap();
        assert_eq!(page.plan(12), Ok(PagePlan::Exhausted { next_offset: 12 }));
    }

    #[test]
    fn test_offset_beyond_total_is_out_of_range() {
        let page = PageRequest::new(13, 10).unwrap();
        assert_eq!(
            page.plan(12),
            Err(PageError::OffsetBeyondTotal {
                offset: 13,
                total: 12
            })
        );
    }

    #[test]
    fn test_walking_pages_covers_total_exactly() {
        let total = 23;
        let mut offset = 0;
        let mut seen = 0;
        loop {
            match PageRequest::new(offset, 10).unwrap().plan(total).unwrap() {
                PagePlan::Exhausted { next_offset } => {
                    assert_eq!(next_offset, total);
                    break;
                }
                PagePlan::Fetch { offset: o, limit } => {
                    let fetched = limit.min(total - o) as usize;
                    seen += fetched;
                    offset = next_offset(o, fetched, total);
                }
            }
        }
        assert_eq!(seen as i64, total);
    }

    #[test]
    fn test_next_offset_is_clamped() {
        assert_eq!(next_offset(20, 10, 23), 23);
        assert_eq!(next_offset(0, 10, 23), 10);
    }
}
