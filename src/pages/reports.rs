use crate::api::models::WinLossReport;
use crate::api::{settle, ApiClient};

use super::{Notices, PageState};

pub struct ReportsPage {
    pub report: PageState<WinLossReport>,
    pub notices: Notices,
}

impl Default for ReportsPage {
    fn default() -> Self { Self::new() }
}

impl ReportsPage {
    pub fn new() -> Self {
        Self { report: PageState::new(), notices: Notices::new() }
    }

    pub async fn load(&self, api: &ApiClient) {
        let gen = self.report.begin();
        let result = api.get_json::<WinLossReport>("reports/win-loss").await;
        let (res, notice) = settle(result, "load report");
        if self.report.complete(gen, res) {
            self.notices.extend(notice);
        }
    }
}
