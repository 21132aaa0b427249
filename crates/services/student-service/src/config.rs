//! Student service configuration.

use std::env;

use common::{PhoneSyncStrategy, ServiceConfig, StoreConfig, SyncConfig};

/// Student service configuration.
#[derive(Debug, Clone, Default)]
pub struct StudentServiceConfig {
    pub service: ServiceConfig,
    pub store: StoreConfig,
    pub sync: SyncConfig,
}

impl StudentServiceConfig {
    /// Load the service section alone, so logging can start before the rest.
    pub fn service_from_env() -> ServiceConfig {
        let defaults = ServiceConfig::default();

        ServiceConfig {
            service_name: defaults.service_name,
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Unparseable values are logged and replaced by their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let phone_sync = match env::var("STUDENT_SERVICE_PHONE_SYNC") {
            Ok(value) => value.parse::<PhoneSyncStrategy>().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default phone sync");
                PhoneSyncStrategy::default()
            }),
            Err(_) => PhoneSyncStrategy::default(),
        };

        Self {
            service: Self::service_from_env(),
            store: StoreConfig {
                path: env::var("STUDENT_SERVICE_STORE_PATH").unwrap_or(defaults.store.path),
            },
            sync: SyncConfig {
                phone_sync,
                cascade_delete: env::var("STUDENT_SERVICE_CASCADE_DELETE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.sync.cascade_delete),
            },
        }
    }
}
