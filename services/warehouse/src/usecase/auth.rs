use anyhow::Context as _;

use warehouse_auth_types::password;
use warehouse_auth_types::token::TokenKeys;

use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::types::SignInPayload;
use crate::error::{Resource, WarehouseServiceError};

// ── Password hashing ─────────────────────────────────────────────────────────
//
// bcrypt is CPU-bound; run it off the async workers.

pub(crate) async fn hash_password(plain: String, cost: u32) -> Result<String, WarehouseServiceError> {
    let hashed = tokio::task::spawn_blocking(move || password::hash_password(&plain, cost))
        .await
        .context("join password hasher")?
        .context("hash password")?;
    Ok(hashed)
}

pub(crate) async fn verify_password(
    plain: String,
    hash: String,
) -> Result<bool, WarehouseServiceError> {
    let ok = tokio::task::spawn_blocking(move || password::verify_password(&plain, &hash))
        .await
        .context("join password verifier")?;
    Ok(ok)
}

// ── SignIn ───────────────────────────────────────────────────────────────────

pub struct SignInUseCase<U: UserRepository, R: RoleRepository> {
    pub users: U,
    pub roles: R,
    pub tokens: TokenKeys,
}

impl<U: UserRepository, R: RoleRepository> SignInUseCase<U, R> {
    /// Returns a signed token for the user's credentials.
    pub async fn execute(&self, input: SignInPayload) -> Result<String, WarehouseServiceError> {
        let user = self
            .users
            .find_by_username(&input.username)
            .await?
            .ok_or(WarehouseServiceError::NotFound(Resource::User))?;

        if !verify_password(input.password, user.password.clone()).await? {
            return Err(WarehouseServiceError::InvalidCredentials);
        }

        let role_id = user
            .role_id
            .ok_or(WarehouseServiceError::NotFound(Resource::Role))?;
        let role = self
            .roles
            .find_by_id(role_id)
            .await?
            .ok_or(WarehouseServiceError::NotFound(Resource::Role))?;

        let token = self
            .tokens
            .issue(user.id, &user.username, &role.name)
            .context("sign access token")?;
        Ok(token)
    }
}

// ── SignOut ──────────────────────────────────────────────────────────────────

pub struct SignOutUseCase {
    pub tokens: TokenKeys,
}

impl SignOutUseCase {
    /// Stateless: hands back a token that is already expired.
    pub fn execute(&self) -> Result<String, WarehouseServiceError> {
        let token = self
            .tokens
            .issue_expired()
            .context("sign expired token")?;
        Ok(token)
    }
}
