//! Runtime wiring
//!
//! Builds the backend client, local store, cache and session gate from
//! `AppConfig`, and restores any stored admin session at startup.

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use configs::AppConfig;

use crate::cache::QueryCache;
use crate::remote::{BackendActor, HttpBackend};
use crate::session::AdminSessionGate;
use crate::site::SiteClient;
use crate::storage::LocalStore;

/// Assemble a `SiteClient` talking HTTP to the configured backend.
pub fn build_from_config(cfg: &AppConfig) -> anyhow::Result<SiteClient> {
    let backend: Arc<dyn BackendActor> =
        Arc::new(HttpBackend::from_config(&cfg.backend).context("building backend client")?);
    build_with_backend(cfg, backend)
}

/// Same wiring with a caller-supplied backend.
pub fn build_with_backend(cfg: &AppConfig, backend: Arc<dyn BackendActor>) -> anyhow::Result<SiteClient> {
    let local = LocalStore::open(&cfg.session.marker_path)
        .with_context(|| format!("opening local store {}", cfg.session.marker_path))?;
    let cache = QueryCache::from_config(&cfg.cache);
    let gate = Arc::new(AdminSessionGate::new(
        Arc::clone(&backend),
        local,
        cache,
        cfg.session.validation_timeout(),
    ));
    Ok(SiteClient::new(backend, gate))
}

/// Load `.env` and config, init logging (`LOG_FORMAT=json` for JSON lines),
/// then validate any stored session.
pub async fn bootstrap() -> anyhow::Result<SiteClient> {
    dotenv().ok();
    let log_format = common::utils::logging::LogFormat::from_env();
    common::utils::logging::init_logging(log_format);

    let cfg = AppConfig::load_and_validate()?;
    common::env::ensure_parent_dir(&cfg.session.marker_path).await?;

    let site = build_from_config(&cfg)?;
    let snapshot = site.gate().validate_session().await;
    info!(backend = %cfg.backend.base_url, state = ?snapshot.state, "site client ready");
    Ok(site)
}
