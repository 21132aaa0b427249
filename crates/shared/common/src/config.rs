//! Shared configuration structures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Log filter directive, e.g. `info` or `student_service=debug`
    pub log_level: String,
}

impl ServiceConfig {
    /// Filter directive for the log subscriber; verbose mode forces `debug`.
    pub fn log_filter(&self, verbose: bool) -> &str {
        if verbose {
            "debug"
        } else {
            &self.log_level
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "student-service".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Document store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// JSON file backing the file store
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "students.json".to_string(),
        }
    }
}

/// How an update reconciles a student's phone collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneSyncStrategy {
    /// Delete only removed numbers and create only new ones
    #[default]
    Diff,
    /// Delete every stored phone, then recreate the full list
    Replace,
}

impl FromStr for PhoneSyncStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diff" => Ok(PhoneSyncStrategy::Diff),
            "replace" => Ok(PhoneSyncStrategy::Replace),
            other => Err(AppError::validation(format!(
                "Unknown phone sync strategy: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for PhoneSyncStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhoneSyncStrategy::Diff => write!(f, "diff"),
            PhoneSyncStrategy::Replace => write!(f, "replace"),
        }
    }
}

/// Roster synchronization behavior.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Phone reconciliation used by updates
    #[serde(default)]
    pub phone_sync: PhoneSyncStrategy,
    /// Remove phone documents together with their student.
    ///
    /// Off by default: deleting a student leaves its phones in the store.
    #[serde(default)]
    pub cascade_delete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter() {
        let config = ServiceConfig {
            log_level: "student_service=trace".to_string(),
            ..ServiceConfig::default()
        };

        assert_eq!(config.log_filter(false), "student_service=trace");
        assert_eq!(config.log_filter(true), "debug");
        assert_eq!(ServiceConfig::default().log_filter(false), "info");
    }

    #[test]
    fn test_parse_phone_sync_strategy() {
        assert_eq!(
            "diff".parse::<PhoneSyncStrategy>().unwrap(),
            PhoneSyncStrategy::Diff
        );
        assert_eq!(
            " Replace ".parse::<PhoneSyncStrategy>().unwrap(),
            PhoneSyncStrategy::Replace
        );
        assert!("merge".parse::<PhoneSyncStrategy>().is_err());
    }

    #[test]
    fn test_sync_config_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.phone_sync, PhoneSyncStrategy::Diff);
        assert!(!config.cascade_delete);
    }

    #[test]
    fn test_sync_config_deserialize() {
        let config: SyncConfig =
            serde_json::from_str(r#"{"phone_sync":"replace","cascade_delete":true}"#).unwrap();
        assert_eq!(config.phone_sync, PhoneSyncStrategy::Replace);
        assert!(config.cascade_delete);

        let config: SyncConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.phone_sync, PhoneSyncStrategy::Diff);
    }
}
