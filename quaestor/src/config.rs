//! Tunable timing and scrolling parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for waiting and scrolling behavior.
///
/// The scroll-end threshold and the iteration cap are deliberately
/// configuration rather than constants: hosts with coarse scroll-percent
/// reporting sometimes never reach exactly 100%, and a misbehaving control
/// that keeps reporting progress must not loop forever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// How long `DataGrid::item` waits for the grid to become enabled.
    #[serde(with = "duration_millis")]
    pub enable_wait_timeout: Duration,
    /// Poll interval of bounded waits.
    #[serde(with = "duration_millis")]
    pub poll_interval: Duration,
    /// Scroll percent at or above which a scroll axis counts as exhausted.
    pub scroll_end_threshold: f64,
    /// Hard cap on scroll steps per phase of a scroll-into-view operation.
    pub max_scroll_steps: usize,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            enable_wait_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(100),
            scroll_end_threshold: 99.9,
            max_scroll_steps: 500,
        }
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
