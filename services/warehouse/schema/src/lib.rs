//! sea-orm entities for the warehouse tables.
//!
//! Table names are unqualified; the connection's `search_path` selects the
//! configured schema.

pub mod items;
pub mod order_items;
pub mod orders;
pub mod roles;
pub mod trucks;
pub mod users;
