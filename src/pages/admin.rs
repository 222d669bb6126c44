use futures_util::future::join;

use crate::api::models::AdminStats;
use crate::api::{ApiClient, Resource};
use crate::session::User;

use super::{Notices, PageState};

/// Super-admin console. Stats and the user list are fetched concurrently and
/// the page leaves its loading state only once both have settled. A failure
/// of either call surfaces one generic notice; whichever half succeeded is
/// kept, nothing is rolled back.
pub struct AdminPage {
    pub stats: PageState<AdminStats>,
    pub users: PageState<Vec<User>>,
    pub notices: Notices,
}

impl Default for AdminPage {
    fn default() -> Self { Self::new() }
}

impl AdminPage {
    pub fn new() -> Self {
        Self { stats: PageState::new(), users: PageState::new(), notices: Notices::new() }
    }

    pub async fn load(&self, api: &ApiClient) {
        let stats_gen = self.stats.begin();
        let users_gen = self.users.begin();

        let (stats_res, users_res) = join(
            api.get_json::<AdminStats>("admin/stats"),
            api.get_json::<Vec<User>>("admin/users"),
        )
        .await;

        let mut failed = false;

        let res = match stats_res {
            Ok(s) => Resource::Ready(s),
            Err(e) => {
                tracing::warn!(target: "hexabid::api", "load admin stats failed: {}", e);
                failed = true;
                Resource::Failed("Failed to load admin data".to_string())
            }
        };
        let stats_current = self.stats.complete(stats_gen, res);

        let res = match users_res {
            Ok(u) => Resource::Ready(u),
            Err(e) => {
                tracing::warn!(target: "hexabid::api", "load admin users failed: {}", e);
                failed = true;
                Resource::Failed("Failed to load admin data".to_string())
            }
        };
        let users_current = self.users.complete(users_gen, res);

        if failed && (stats_current || users_current) {
            self.notices.error("Failed to load admin data");
        }
    }

    pub fn user_rows(&self) -> Vec<User> {
        self.users.ready().unwrap_or_default()
    }
}
