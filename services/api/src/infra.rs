use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

impl AppState {
    pub(crate) fn new(metrics: Arc<PrometheusHandle>) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics,
        }
    }
}
