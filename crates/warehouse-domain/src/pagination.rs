//! Pagination window shared across all list endpoints.

use serde::{Deserialize, Serialize};

/// Largest offset or limit a window will produce (`i64::MAX`).
pub const MAX_WINDOW: u64 = i64::MAX as u64;

/// Page request carried by every `GET` collection endpoint.
///
/// A zero in either field means "no window": the full set is returned.
/// Otherwise the window skips `(page - 1) * limit` rows and takes `limit`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub limit: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// Return the full set.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.page == 0 || self.limit == 0
    }

    /// `(offset, limit)` for the query, or `None` when the full set is wanted.
    ///
    /// Both values are capped at [`MAX_WINDOW`] so they bind as a Postgres
    /// `BIGINT`.
    pub fn window(&self) -> Option<(u64, u64)> {
        if self.is_unbounded() {
            return None;
        }
        let offset = (self.page - 1).saturating_mul(self.limit).min(MAX_WINDOW);
        Some((offset, self.limit.min(MAX_WINDOW)))
    }

    /// Apply the window to an in-memory slice.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.window() {
            None => items,
            Some((offset, limit)) => {
                let start = usize::try_from(offset).unwrap_or(usize::MAX).min(items.len());
                let end = start
                    .saturating_add(usize::try_from(limit).unwrap_or(usize::MAX))
                    .min(items.len());
                &items[start..end]
            }
        }
    }
}
