pub mod auth;
pub mod health;
pub mod item;
pub mod order;
pub mod role;
pub mod truck;
pub mod user;

use axum::extract::FromRequest;
use serde::Deserialize;

use warehouse_domain::pagination::Pagination;

use crate::error::WarehouseServiceError;

/// `Json` whose rejection is the service error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(WarehouseServiceError))]
pub struct JsonBody<T>(pub T);

/// Parse a `/{id}` path segment strictly as a decimal `i32`.
/// A leading sign or whitespace is rejected.
pub fn parse_id(raw: &str) -> Result<i32, WarehouseServiceError> {
    let invalid = || WarehouseServiceError::BadRequest("invalid id".into());
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<i32>().map_err(|_| invalid())
}

#[derive(Deserialize, Default)]
struct PageQuery {
    page: Option<String>,
    limit: Option<String>,
}

/// Read `page` and `limit` from the raw query string.
///
/// Anything missing or non-numeric counts as 0, which returns the full set.
pub fn pagination(raw_query: Option<&str>) -> Pagination {
    let query: PageQuery = raw_query
        .and_then(|q| serde_qs::from_str(q).ok())
        .unwrap_or_default();
    let number = |v: Option<String>| v.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(0);
    Pagination::new(number(query.page), number(query.limit))
}
