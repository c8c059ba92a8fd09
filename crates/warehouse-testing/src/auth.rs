//! Bearer-token helpers for integration tests.
//!
//! Tokens are signed with [`TEST_JWT_SECRET`], so the router under test must
//! be built with the same secret.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use chrono::Utc;

use warehouse_auth_types::bearer::bearer_value;
use warehouse_auth_types::token::{Claims, TokenKeys};
use warehouse_domain::role::RoleName;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Identity to sign into a test token.
pub struct MockAuth {
    pub user_id: i32,
    pub username: String,
    pub role: RoleName,
}

impl MockAuth {
    pub fn new(user_id: i32, username: &str, role: RoleName) -> Self {
        Self {
            user_id,
            username: username.to_owned(),
            role,
        }
    }

    pub fn user() -> Self {
        Self::new(1, "userTest", RoleName::User)
    }

    pub fn admin() -> Self {
        Self::new(2, "adminTest", RoleName::Admin)
    }

    pub fn sys_admin() -> Self {
        Self::new(3, "sysAdminTest", RoleName::SysAdmin)
    }

    pub fn keys() -> TokenKeys {
        TokenKeys::new(TEST_JWT_SECRET)
    }

    pub fn token(&self) -> String {
        Self::keys()
            .issue(self.user_id, &self.username, self.role.as_str())
            .expect("sign test token")
    }

    /// `Authorization: Bearer <token>`.
    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_str(&bearer_value(&self.token())).expect("ascii header value")
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.header_value());
        map
    }
}

/// A correctly signed token that carries no `role` claim.
pub fn roleless_header_value() -> HeaderValue {
    let now = Utc::now().timestamp();
    let token = MockAuth::keys()
        .sign(&Claims {
            exp: now + 60,
            iat: now,
            sub: Some(1),
            user: Some("noRole".to_owned()),
            role: None,
        })
        .expect("sign test token");
    HeaderValue::from_str(&bearer_value(&token)).expect("ascii header value")
}
