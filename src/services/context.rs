//! Shared handles for the services

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::clock::Clock;
use crate::storage::LedgerStore;

/// Store, clock and optional audit log, borrowed by every service
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn LedgerStore>,
    clock: Arc<dyn Clock>,
    audit: Option<AuditLogger>,
}

impl Ledger {
    pub fn new(store: Arc<dyn LedgerStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            audit: None,
        }
    }

    /// Record every mutation in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn store(&self) -> &dyn LedgerStore {
        self.store.as_ref()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    pub(crate) fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        if self.audit.is_some() {
            let entry = AuditEntry::create(self.now(), entity_type, entity_id, entity_name, entity);
            self.log_batch(&[entry]);
        }
    }

    pub(crate) fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) {
        if self.audit.is_some() {
            let entry =
                AuditEntry::update(self.now(), entity_type, entity_id, entity_name, before, after);
            self.log_batch(&[entry]);
        }
    }

    pub(crate) fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        if self.audit.is_some() {
            let entry = AuditEntry::delete(self.now(), entity_type, entity_id, entity_name, entity);
            self.log_batch(&[entry]);
        }
    }

    /// Write several entries in one append
    ///
    /// Called after the store write has succeeded, so a failed append is
    /// logged and does not fail the operation.
    pub(crate) fn log_batch(&self, entries: &[AuditEntry]) {
        let Some(logger) = &self.audit else {
            return;
        };
        if let Err(e) = logger.log_batch(entries) {
            tracing::warn!(
                path = %logger.path().display(),
                entries = entries.len(),
                error = %e,
                "failed to write audit entries"
            );
        }
    }
}
