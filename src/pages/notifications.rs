use serde_json::Value;

use crate::api::models::Notification;
use crate::api::{settle, ApiClient};

use super::{Notices, PageState};

pub struct NotificationsPage {
    pub items: PageState<Vec<Notification>>,
    pub notices: Notices,
}

impl Default for NotificationsPage {
    fn default() -> Self { Self::new() }
}

impl NotificationsPage {
    pub fn new() -> Self {
        Self { items: PageState::new(), notices: Notices::new() }
    }

    pub async fn load(&self, api: &ApiClient) {
        let gen = self.items.begin();
        let result = api.get_json::<Vec<Notification>>("notifications").await;
        let (res, notice) = settle(result, "load notifications");
        if self.items.complete(gen, res) {
            self.notices.extend(notice);
        }
    }

    pub async fn mark_read(&self, api: &ApiClient, notification_id: &str) {
        let path = format!("notifications/{}/read", notification_id);
        match api.put_empty::<Value>(&path).await {
            Ok(_) => self.load(api).await,
            Err(e) => {
                tracing::warn!(target: "hexabid::api", "mark read failed: {}", e);
                self.notices.error("Failed to update notification");
            }
        }
    }

    pub fn unread_count(&self) -> usize {
        self.items
            .ready()
            .map(|items| items.iter().filter(|n| !n.read).count())
            .unwrap_or(0)
    }
}
