//! Notification fan-out configuration.

use serde::{Deserialize, Serialize};

/// Controls how recipient sets are streamed into delivery records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Number of recipients read and inserted per round trip.
    #[serde(default = "default_batch_size")]
    pub fanout_batch_size: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            fanout_batch_size: default_batch_size(),
        }
    }
}

fn default_batch_size() -> u32 {
    1000
}
