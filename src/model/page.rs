use serde::{Deserialize, Serialize};

/// Largest page a list call returns; also the page size used when none is given.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Offset paging for list and search calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub skip: u64,
    pub take: u64,
}

impl Page {
    pub fn new(skip: u64, take: u64) -> Self {
        Self { skip, take }
    }

    /// `(skip, take)` after clamping: an oversized `take`, or an all-zero page,
    /// becomes [`MAX_PAGE_SIZE`].
    pub fn window(&self) -> (usize, Option<usize>) {
        let take = if self.take > MAX_PAGE_SIZE || (self.skip == 0 && self.take == 0) {
            MAX_PAGE_SIZE
        } else {
            self.take
        };
        (to_usize(self.skip), Some(to_usize(take)))
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
