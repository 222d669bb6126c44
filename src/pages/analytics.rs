use crate::api::models::TenderTrends;
use crate::api::{settle, ApiClient};

use super::{Notices, PageState};

pub struct AnalyticsPage {
    pub trends: PageState<TenderTrends>,
    pub notices: Notices,
}

impl Default for AnalyticsPage {
    fn default() -> Self { Self::new() }
}

impl AnalyticsPage {
    pub fn new() -> Self {
        Self { trends: PageState::new(), notices: Notices::new() }
    }

    pub async fn load(&self, api: &ApiClient) {
        let gen = self.trends.begin();
        let result = api.get_json::<TenderTrends>("analytics/tender-trends").await;
        let (res, notice) = settle(result, "load analytics");
        if self.trends.complete(gen, res) {
            self.notices.extend(notice);
        }
    }
}
