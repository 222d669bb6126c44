use parking_lot::RwLock;

use crate::api::models::{CrmContact, NewContact};
use crate::api::{settle, ApiClient};

use super::{Notices, PageState};

pub struct CrmPage {
    pub contacts: PageState<Vec<CrmContact>>,
    pub notices: Notices,
    type_filter: RwLock<Option<String>>,
}

impl Default for CrmPage {
    fn default() -> Self { Self::new() }
}

impl CrmPage {
    pub fn new() -> Self {
        Self { contacts: PageState::new(), notices: Notices::new(), type_filter: RwLock::new(None) }
    }

    pub fn set_type_filter(&self, filter: Option<String>) {
        *self.type_filter.write() = filter;
    }

    pub async fn load(&self, api: &ApiClient) {
        let gen = self.contacts.begin();
        let filter = self.type_filter.read().clone();
        let result = match filter {
            Some(t) => {
                api.get_json_query::<Vec<CrmContact>>("crm/contacts", &[("type", t)]).await
            }
            None => api.get_json::<Vec<CrmContact>>("crm/contacts").await,
        };
        let (res, notice) = settle(result, "load contacts");
        if self.contacts.complete(gen, res) {
            self.notices.extend(notice);
        }
    }

    /// Create a contact and reload the list. On failure the submitted form
    /// is handed back to the caller so nothing has to be re-entered.
    pub async fn add_contact(&self, api: &ApiClient, contact: NewContact) -> Result<(), NewContact> {
        match api.post_json::<CrmContact, _>("crm/contacts", &contact).await {
            Ok(_) => {
                self.notices.success("Contact added");
                self.load(api).await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(target: "hexabid::api", "add contact failed: {}", e);
                self.notices.error("Failed to add contact");
                Err(contact)
            }
        }
    }

    pub fn rows(&self) -> Vec<CrmContact> {
        self.contacts.ready().unwrap_or_default()
    }
}
