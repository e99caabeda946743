use std::net::SocketAddr;
use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;

use crate::api::server::AppState;
use crate::db::prelude::*;
use crate::util::env::{EnvErr, ServerConfig};
use crate::util::telemetry;

mod api;
mod avatar;
mod cache;
mod constants;
mod db;
mod pages;
mod util;

#[derive(Debug, Error)]
enum RunnerErr {
    #[error(transparent)]
    Env(#[from] EnvErr),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Route(#[from] api::server::RouteError),

    #[error(transparent)]
    Std(#[from] Box<dyn std::error::Error>),
}

type Result<T> = core::result::Result<T, RunnerErr>;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;
    let telemetry_registry = telemetry::Telemetry::new(&config)?.register();

    tracing::info!("starting main application");

    let db = Db::connect(&config.database_url).await?;

    let games = GameRepository::new(db.pool.clone());
    games.seed_sample_catalog().await.map_err(DbError::from)?;

    let state = Arc::new(AppState::from_config(db.pool.clone(), &config));

    let (tx_server_ready, rx_server_ready) = tokio::sync::mpsc::unbounded_channel::<SocketAddr>();

    let handles = api::server::start_server(
        state,
        config.server_api_port,
        tx_server_ready,
        rx_server_ready,
    )
    .await?;

    _ = join_all(handles).await;

    telemetry_registry.shutdown();
    Ok(())
}
