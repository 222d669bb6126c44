use crate::api::models::Subscription;
use crate::api::{settle, ApiClient};

use super::{Notices, PageState};

pub struct SubscriptionPage {
    pub subscription: PageState<Subscription>,
    pub notices: Notices,
}

impl Default for SubscriptionPage {
    fn default() -> Self { Self::new() }
}

impl SubscriptionPage {
    pub fn new() -> Self {
        Self { subscription: PageState::new(), notices: Notices::new() }
    }

    pub async fn load(&self, api: &ApiClient) {
        let gen = self.subscription.begin();
        let result = api.get_json::<Subscription>("subscription/my-subscription").await;
        let (res, notice) = settle(result, "load subscription");
        if self.subscription.complete(gen, res) {
            self.notices.extend(notice);
        }
    }
}
