use anyhow::{Context as _, anyhow};
use serde::Deserialize;
use url::Url;

use warehouse_core::config::Config;

/// Warehouse service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConfig {
    /// Env var: `POSTGRES_HOST`.
    pub postgres_host: String,
    /// Env var: `POSTGRES_USER`.
    pub postgres_user: String,
    /// Env var: `POSTGRES_PASSWORD`.
    pub postgres_password: String,
    /// Env var: `POSTGRES_DB`.
    pub postgres_db: String,
    /// Env var: `POSTGRES_PORT`.
    pub postgres_port: u16,
    /// Postgres schema holding every table. Env var: `TABLE_PREFIX`.
    pub table_prefix: String,
    /// HTTP listen port. Env var: `PORT`.
    pub port: u16,
    /// HMAC secret for signing bearer tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// bcrypt work factor (default 12). Env var: `BCRYPT_COST`.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_bcrypt_cost() -> u32 {
    warehouse_auth_types::password::DEFAULT_COST
}

impl Config for WarehouseConfig {}

impl WarehouseConfig {
    /// Postgres URL with every component escaped by `url`.
    pub fn database_url(&self) -> anyhow::Result<String> {
        let mut url = Url::parse("postgres://localhost")?;
        url.set_host(Some(&self.postgres_host))
            .with_context(|| format!("invalid POSTGRES_HOST {:?}", self.postgres_host))?;
        url.set_port(Some(self.postgres_port))
            .map_err(|()| anyhow!("cannot set POSTGRES_PORT"))?;
        url.set_username(&self.postgres_user)
            .map_err(|()| anyhow!("cannot set POSTGRES_USER"))?;
        url.set_password(Some(&self.postgres_password))
            .map_err(|()| anyhow!("cannot set POSTGRES_PASSWORD"))?;
        url.path_segments_mut()
            .map_err(|()| anyhow!("cannot set POSTGRES_DB"))?
            .clear()
            .push(&self.postgres_db);
        Ok(url.into())
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Reject values that parse but cannot be used.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (4..=31).contains(&self.bcrypt_cost),
            "BCRYPT_COST must be between 4 and 31, got {}",
            self.bcrypt_cost
        );
        anyhow::ensure!(!self.table_prefix.is_empty(), "TABLE_PREFIX must not be empty");
        anyhow::ensure!(!self.jwt_secret.is_empty(), "JWT_SECRET must not be empty");
        Ok(())
    }
}
