use warehouse_auth_types::token::TokenKeys;

use crate::domain::repository::Repositories;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState<R> {
    pub repos: R,
    pub tokens: TokenKeys,
    /// bcrypt work factor for new hashes.
    pub hash_cost: u32,
}

impl<R: Repositories> AppState<R> {
    pub fn new(repos: R, tokens: TokenKeys, hash_cost: u32) -> Self {
        Self {
            repos,
            tokens,
            hash_cost,
        }
    }

    pub fn user_repo(&self) -> R::Users {
        self.repos.users()
    }

    pub fn role_repo(&self) -> R::Roles {
        self.repos.roles()
    }

    pub fn item_repo(&self) -> R::Items {
        self.repos.items()
    }

    pub fn truck_repo(&self) -> R::Trucks {
        self.repos.trucks()
    }

    pub fn order_repo(&self) -> R::Orders {
        self.repos.orders()
    }
}
