use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use compass::assessment::{PortalStatus, ResponseStore, StoreError, SubmissionRecord};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Memory-backed stand-in for the spreadsheet store, used by the demo and
/// the route tests. Starts closed, like a freshly provisioned sheet.
pub(crate) struct InMemoryResponseStore {
    status: Mutex<PortalStatus>,
    records: Mutex<Vec<SubmissionRecord>>,
}

impl Default for InMemoryResponseStore {
    fn default() -> Self {
        Self {
            status: Mutex::new(PortalStatus::Closed),
            records: Mutex::new(Vec::new()),
        }
    }
}

impl InMemoryResponseStore {
    pub(crate) fn open() -> Self {
        let store = Self::default();
        *store.status.lock().expect("status mutex poisoned") = PortalStatus::Open;
        store
    }

    pub(crate) fn records(&self) -> Vec<SubmissionRecord> {
        self.records.lock().expect("records mutex poisoned").clone()
    }
}

impl ResponseStore for InMemoryResponseStore {
    fn status(&self) -> Result<PortalStatus, StoreError> {
        Ok(*self.status.lock().expect("status mutex poisoned"))
    }

    fn set_status(&self, status: PortalStatus) -> Result<(), StoreError> {
        *self.status.lock().expect("status mutex poisoned") = status;
        Ok(())
    }

    fn append(&self, record: &SubmissionRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("records mutex poisoned")
            .push(record.clone());
        Ok(())
    }
}
