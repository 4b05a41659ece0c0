use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use recruitment::candidates::{HttpLegacyNotifier, SqliteCandidateStore};
use recruitment::config::AppConfig;
use recruitment::error::AppError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire the SQLite store to the HTTP legacy notifier from configuration.
pub(crate) fn build_store(
    config: &AppConfig,
) -> Result<Arc<SqliteCandidateStore<HttpLegacyNotifier>>, AppError> {
    let notifier = HttpLegacyNotifier::from_config(&config.legacy)?;
    let store = SqliteCandidateStore::open(&config.database.path, Arc::new(notifier))?;
    Ok(Arc::new(store))
}
