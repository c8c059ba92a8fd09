use anyhow::Context as _;
use tracing::info;

use warehouse_api::config::WarehouseConfig;
use warehouse_api::infra::db::{DbRepositories, connect};
use warehouse_api::router::build_router;
use warehouse_api::state::AppState;
use warehouse_auth_types::token::TokenKeys;
use warehouse_core::config::Config as _;
use warehouse_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = WarehouseConfig::from_env().context("load configuration")?;
    config.validate()?;

    let db = connect(&config).await?;

    let state = AppState::new(
        DbRepositories::new(db),
        TokenKeys::new(&config.jwt_secret),
        config.bcrypt_cost,
    );

    let router = build_router(state);
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!("warehouse service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
