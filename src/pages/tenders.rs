use parking_lot::RwLock;

use crate::api::models::Tender;
use crate::api::{settle, ApiClient};

use super::{Notices, PageState};

/// Tender listing with optional category/status filters. A failed fetch
/// renders the zero-item state plus one notice, never an error page.
pub struct TendersPage {
    pub items: PageState<Vec<Tender>>,
    pub notices: Notices,
    filters: RwLock<Filters>,
}

#[derive(Default, Clone)]
struct Filters {
    category: Option<String>,
    status: Option<String>,
}

impl Default for TendersPage {
    fn default() -> Self { Self::new() }
}

impl TendersPage {
    pub fn new() -> Self {
        Self { items: PageState::new(), notices: Notices::new(), filters: RwLock::new(Filters::default()) }
    }

    pub fn set_category(&self, category: Option<String>) {
        self.filters.write().category = category;
    }

    pub fn set_status(&self, status: Option<String>) {
        self.filters.write().status = status;
    }

    pub async fn load(&self, api: &ApiClient) {
        let gen = self.items.begin();
        let filters = self.filters.read().clone();
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(c) = filters.category {
            query.push(("category", c));
        }
        if let Some(s) = filters.status {
            query.push(("status", s));
        }
        let result = if query.is_empty() {
            api.get_json::<Vec<Tender>>("tenders").await
        } else {
            api.get_json_query::<Vec<Tender>>("tenders", &query).await
        };
        let (res, notice) = settle(result, "load tenders");
        if self.items.complete(gen, res) {
            self.notices.extend(notice);
        }
    }

    /// Rows currently renderable; a loading or failed slot shows zero items.
    pub fn rows(&self) -> Vec<Tender> {
        self.items.ready().unwrap_or_default()
    }
}
