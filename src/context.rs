//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::config::ClientConfig;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Settings read at startup
    pub config: StoredValue<ClientConfig>,
    /// Current notification, if any - read
    pub notice: ReadSignal<Option<String>>,
    /// Current notification, if any - write
    set_notice: WriteSignal<Option<String>>,
}

impl AppContext {
    pub fn new(config: ClientConfig, notice: (ReadSignal<Option<String>>, WriteSignal<Option<String>>)) -> Self {
        Self {
            config: StoredValue::new(config),
            notice: notice.0,
            set_notice: notice.1,
        }
    }

    /// Snapshot of the config for use inside async tasks
    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }

    /// Show a non-blocking message, replacing the current one
    pub fn notify(&self, message: impl Into<String>) {
        let message = message.into();
        log::error!("[App] {}", message);
        self.set_notice.set(Some(message));
    }

    pub fn dismiss(&self) {
        self.set_notice.set(None);
    }
}
