use sea_orm::QuerySelect;

use warehouse_domain::pagination::Pagination;

/// Apply a [`Pagination`] window as `OFFSET`/`LIMIT`.
pub trait Windowed {
    fn windowed(self, page: Pagination) -> Self;
}

impl<Q> Windowed for Q
where
    Q: QuerySelect,
{
    fn windowed(self, page: Pagination) -> Self {
        match page.window() {
            None => self,
            Some((offset, limit)) => self.offset(offset).limit(limit),
        }
    }
}
