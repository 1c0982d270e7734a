use serde::Serialize;

use super::Container;

/// Aggregate counts shown on the dashboard.
///
/// Always derived from a fresh listing; `containers_up + containers_down`
/// equals `containers_total` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub containers_total: usize,
    pub containers_up: usize,
    pub containers_down: usize,
    pub images_total: usize,
    pub simulated: bool,
}

impl Dashboard {
    pub fn summarize(containers: &[Container], images_total: usize, simulated: bool) -> Self {
        let containers_total = containers.len();
        let containers_up = containers.iter().filter(|c| c.state.is_running()).count();

        Self {
            containers_total,
            containers_up,
            containers_down: containers_total - containers_up,
            images_total,
            simulated,
        }
    }
}
