//! Application state shared across handlers.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};

use crate::config::AdminConfig;
use crate::supabase::{SupabaseClient, SupabaseError};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    supabase: SupabaseClient,
}

impl AppState {
    /// Build the state, creating the backend client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the backend client cannot be created.
    pub fn new(config: AdminConfig) -> Result<Self, SupabaseError> {
        let supabase = SupabaseClient::new(&config.supabase)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, supabase }),
        })
    }

    /// Returns the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Returns the backend client.
    #[must_use]
    pub fn supabase(&self) -> &SupabaseClient {
        &self.inner.supabase
    }

    /// Current wall-clock time in the reporting timezone.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.inner.config.reporting_offset)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("supabase", &self.inner.supabase)
            .finish()
    }
}
