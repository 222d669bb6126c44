use crate::api::models::{NewTicket, SupportTicket};
use crate::api::{settle, ApiClient};

use super::{Notices, PageState};

pub struct SupportPage {
    pub tickets: PageState<Vec<SupportTicket>>,
    pub notices: Notices,
}

impl Default for SupportPage {
    fn default() -> Self { Self::new() }
}

impl SupportPage {
    pub fn new() -> Self {
        Self { tickets: PageState::new(), notices: Notices::new() }
    }

    pub async fn load(&self, api: &ApiClient) {
        let gen = self.tickets.begin();
        let result = api.get_json::<Vec<SupportTicket>>("support/tickets").await;
        let (res, notice) = settle(result, "load tickets");
        if self.tickets.complete(gen, res) {
            self.notices.extend(notice);
        }
    }

    /// File a ticket and reload; the form is returned on failure for retry.
    pub async fn create_ticket(&self, api: &ApiClient, ticket: NewTicket) -> Result<(), NewTicket> {
        match api.post_json::<SupportTicket, _>("support/tickets", &ticket).await {
            Ok(_) => {
                self.notices.success("Ticket created");
                self.load(api).await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(target: "hexabid::api", "create ticket failed: {}", e);
                self.notices.error("Failed to create ticket");
                Err(ticket)
            }
        }
    }
}
