//! Role constants.

use serde::{Deserialize, Serialize};

/// Permission level carried in the `role` claim.
///
/// Ids are stable: 1 = User, 2 = Admin, 3 = SysAdmin. Gating compares names
/// exactly; there is no ordering between roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleName {
    User = 1,
    Admin = 2,
    SysAdmin = 3,
}

impl RoleName {
    pub const ALL: [RoleName; 3] = [Self::User, Self::Admin, Self::SysAdmin];

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Admin",
            Self::SysAdmin => "SysAdmin",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == name)
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
