//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::LedgerRepository;
use crate::services::{LogNotifier, Notifier};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for ledger operations
    pub repository: Arc<dyn LedgerRepository>,
    /// Delivery channel for notification events
    pub notifier: Arc<dyn Notifier>,
    /// Slot length used when a listing request has no explicit duration
    pub default_slot_minutes: u32,
}

impl AppState {
    /// Create a new application state with the given repository, a log
    /// notifier and the stock 30 minute slot length.
    pub fn new(repository: Arc<dyn LedgerRepository>) -> Self {
        Self {
            repository,
            notifier: Arc::new(LogNotifier),
            default_slot_minutes: 30,
        }
    }

    /// Replace the notification channel.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replace the default slot length.
    pub fn with_default_slot_minutes(mut self, minutes: u32) -> Self {
        self.default_slot_minutes = minutes;
        self
    }
}
