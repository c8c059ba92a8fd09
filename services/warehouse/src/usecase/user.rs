use warehouse_domain::merge::Merge;
use warehouse_domain::pagination::Pagination;

use crate::domain::dto::UserDto;
use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserPayload};
use crate::error::{Resource, WarehouseServiceError};
use crate::usecase::auth::hash_password;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
    pub hash_cost: u32,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, mut input: UserPayload) -> Result<UserDto, WarehouseServiceError> {
        if input.username.is_empty() {
            return Err(WarehouseServiceError::BadRequest(
                "username is required".into(),
            ));
        }
        if input.password.is_empty() {
            return Err(WarehouseServiceError::BadRequest(
                "password is required".into(),
            ));
        }
        input.password = hash_password(std::mem::take(&mut input.password), self.hash_cost).await?;
        let saved = self.repo.save(&User::from(input)).await?;
        Ok(UserDto::from(saved))
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<UserDto, WarehouseServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(UserDto::from)
            .ok_or(WarehouseServiceError::NotFound(Resource::User))
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self, page: Pagination) -> Result<Vec<UserDto>, WarehouseServiceError> {
        let users = self.repo.find_all(page).await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
    pub hash_cost: u32,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    /// A non-empty password is rehashed before the merge.
    pub async fn execute(
        &self,
        id: i32,
        mut patch: UserPayload,
    ) -> Result<UserDto, WarehouseServiceError> {
        let mut user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(WarehouseServiceError::NotFound(Resource::User))?;
        if !patch.password.is_empty() {
            patch.password =
                hash_password(std::mem::take(&mut patch.password), self.hash_cost).await?;
        }
        user.merge(patch);
        let updated = self.repo.update(&user).await?;
        Ok(UserDto::from(updated))
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<UserDto, WarehouseServiceError> {
        let deleted = self.repo.delete_by_id(id).await?;
        Ok(UserDto::from(deleted))
    }
}
