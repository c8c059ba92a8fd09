//! Bearer authentication and per-group role gating.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use warehouse_auth_types::bearer::{BearerError, bearer_token};
use warehouse_auth_types::token::{AuthError, Claims, TokenKeys};
use warehouse_domain::role::RoleName;

use crate::error::WarehouseServiceError;

/// State for one route group's auth layer.
///
/// `allowed` is matched exactly against the token's role claim. An empty
/// list admits any authenticated role.
#[derive(Clone)]
pub struct RoleGate {
    pub keys: TokenKeys,
    pub allowed: &'static [RoleName],
}

impl RoleGate {
    pub fn new(keys: TokenKeys, allowed: &'static [RoleName]) -> Self {
        Self { keys, allowed }
    }

    pub fn any_role(keys: TokenKeys) -> Self {
        Self::new(keys, &[])
    }

    /// Run every check against the request headers and return the claims.
    pub fn check(&self, headers: &axum::http::HeaderMap) -> Result<Claims, WarehouseServiceError> {
        let token = bearer_token(headers).map_err(|e| match e {
            BearerError::Missing => WarehouseServiceError::MissingAuthorization,
            BearerError::Malformed => WarehouseServiceError::InvalidToken(AuthError::Malformed),
        })?;

        let claims = self
            .keys
            .validate(token)
            .map_err(WarehouseServiceError::InvalidToken)?;

        let role = claims
            .role
            .as_deref()
            .ok_or(WarehouseServiceError::MissingRoleClaim)?;

        if !self.allowed.is_empty()
            && !RoleName::from_name(role).is_some_and(|r| self.allowed.contains(&r))
        {
            return Err(WarehouseServiceError::Forbidden);
        }
        Ok(claims)
    }
}

/// Layer with `axum::middleware::from_fn_with_state(gate, authorize)`.
///
/// On success the validated [`Claims`] are available to handlers as
/// `Extension<Claims>`.
pub async fn authorize(
    State(gate): State<RoleGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, WarehouseServiceError> {
    let claims = gate.check(req.headers())?;
    tracing::debug!(user = ?claims.user, role = ?claims.role, "authorized");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
