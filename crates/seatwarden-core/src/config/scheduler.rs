//! Scheduled batch configuration.

use serde::{Deserialize, Serialize};

/// Controls when the daemon runs reservation batches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Whether the cron trigger is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression (with seconds), evaluated in local time.
    #[serde(default = "default_cron")]
    pub cron: String,
    /// Run one batch immediately after startup.
    #[serde(default)]
    pub run_on_startup: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cron: default_cron(),
            run_on_startup: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cron() -> String {
    "0 0 7 * * *".to_string()
}
