use warehouse_domain::merge::Merge;
use warehouse_domain::pagination::Pagination;

use crate::domain::dto::RoleDto;
use crate::domain::repository::RoleRepository;
use crate::domain::types::{Role, RolePayload};
use crate::error::{Resource, WarehouseServiceError};

// ── CreateRole ───────────────────────────────────────────────────────────────

pub struct CreateRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> CreateRoleUseCase<R> {
    /// Role ids are explicit; both the id and the name must be unused.
    pub async fn execute(&self, input: RolePayload) -> Result<RoleDto, WarehouseServiceError> {
        if input.id <= 0 {
            return Err(WarehouseServiceError::BadRequest(
                "role id must be positive".into(),
            ));
        }
        if input.name.is_empty() {
            return Err(WarehouseServiceError::BadRequest("name is required".into()));
        }
        if self.repo.find_by_name(&input.name).await?.is_some() {
            return Err(WarehouseServiceError::DuplicateKey(Resource::Role));
        }
        let saved = self.repo.save(&Role::from(input)).await?;
        Ok(RoleDto::from(saved))
    }
}

// ── GetRole ──────────────────────────────────────────────────────────────────

pub struct GetRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> GetRoleUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<RoleDto, WarehouseServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(RoleDto::from)
            .ok_or(WarehouseServiceError::NotFound(Resource::Role))
    }
}

// ── ListRoles ────────────────────────────────────────────────────────────────

pub struct ListRolesUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> ListRolesUseCase<R> {
    pub async fn execute(&self, page: Pagination) -> Result<Vec<RoleDto>, WarehouseServiceError> {
        let roles = self.repo.find_all(page).await?;
        Ok(roles.into_iter().map(RoleDto::from).collect())
    }
}

// ── UpdateRole ───────────────────────────────────────────────────────────────

pub struct UpdateRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> UpdateRoleUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        patch: RolePayload,
    ) -> Result<RoleDto, WarehouseServiceError> {
        let mut role = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(WarehouseServiceError::NotFound(Resource::Role))?;
        if !patch.name.is_empty() && patch.name != role.name {
            if let Some(other) = self.repo.find_by_name(&patch.name).await? {
                if other.id != role.id {
                    return Err(WarehouseServiceError::DuplicateKey(Resource::Role));
                }
            }
        }
        role.merge(patch);
        let updated = self.repo.update(&role).await?;
        Ok(RoleDto::from(updated))
    }
}

// ── DeleteRole ───────────────────────────────────────────────────────────────

pub struct DeleteRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> DeleteRoleUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<RoleDto, WarehouseServiceError> {
        let deleted = self.repo.delete_by_id(id).await?;
        Ok(RoleDto::from(deleted))
    }
}
