use crate::api::models::{DashboardStats, ImportResult};
use crate::api::{settle, ApiClient};

use super::{Notices, PageState};

pub struct DashboardPage {
    pub stats: PageState<DashboardStats>,
    pub notices: Notices,
}

impl Default for DashboardPage {
    fn default() -> Self { Self::new() }
}

impl DashboardPage {
    pub fn new() -> Self {
        Self { stats: PageState::new(), notices: Notices::new() }
    }

    pub async fn load(&self, api: &ApiClient) {
        let gen = self.stats.begin();
        let result = api.get_json::<DashboardStats>("dashboard/stats").await;
        let (res, notice) = settle(result, "load dashboard stats");
        if self.stats.complete(gen, res) {
            self.notices.extend(notice);
        }
    }

    /// Trigger a server-side tender import and refresh the stats.
    pub async fn import_tenders(&self, api: &ApiClient) {
        match api.post_empty::<ImportResult>("tenders/import").await {
            Ok(ack) => {
                let msg = if ack.message.is_empty() { "Tenders imported".to_string() } else { ack.message };
                self.notices.success(msg);
                self.load(api).await;
            }
            Err(e) => {
                tracing::warn!(target: "hexabid::api", "import tenders failed: {}", e);
                self.notices.error("Failed to import tenders");
            }
        }
    }
}
