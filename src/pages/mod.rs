//! Page view-states. Every page is the same thin binding: generation-counted
//! resource slots, a notice queue, and async operations that call the API
//! layer and map outcomes through `settle`.

mod admin;
mod analytics;
mod chat;
mod crm;
mod dashboard;
mod documents;
mod notifications;
mod reports;
mod subscription;
mod support;
mod tender_detail;
mod tenders;

pub use admin::AdminPage;
pub use analytics::AnalyticsPage;
pub use chat::{ChatPage, ChatTurn, Speaker};
pub use crm::CrmPage;
pub use dashboard::DashboardPage;
pub use documents::DocumentsPage;
pub use notifications::NotificationsPage;
pub use reports::ReportsPage;
pub use subscription::SubscriptionPage;
pub use support::SupportPage;
pub use tender_detail::TenderDetailPage;
pub use tenders::TendersPage;

use std::collections::VecDeque;

use parking_lot::RwLock;

use crate::api::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient toast-style message surfaced to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Per-page queue of pending notices; the shell drains it after each render.
#[derive(Default)]
pub struct Notices {
    queue: RwLock<VecDeque<Notice>>,
}

impl Notices {
    pub fn new() -> Self { Self::default() }

    pub fn error<S: Into<String>>(&self, text: S) {
        self.queue.write().push_back(Notice { level: NoticeLevel::Error, text: text.into() });
    }

    pub fn success<S: Into<String>>(&self, text: S) {
        self.queue.write().push_back(Notice { level: NoticeLevel::Success, text: text.into() });
    }

    /// Queue the error notice produced by `settle`, if any.
    pub fn extend(&self, notice: Option<String>) {
        if let Some(text) = notice {
            self.error(text);
        }
    }

    pub fn drain(&self) -> Vec<Notice> {
        self.queue.write().drain(..).collect()
    }

    pub fn len(&self) -> usize { self.queue.read().len() }
    pub fn is_empty(&self) -> bool { self.queue.read().is_empty() }
}

/// A resource slot guarded by a navigation generation. Loads capture the
/// generation at start; a completion arriving for a stale generation is
/// silently discarded, so a call that outlives its view cannot corrupt the
/// state of whatever replaced it.
pub struct PageState<T> {
    cell: RwLock<(u64, Resource<T>)>,
}

impl<T> Default for PageState<T> {
    fn default() -> Self { Self::new() }
}

impl<T> PageState<T> {
    pub fn new() -> Self {
        Self { cell: RwLock::new((0, Resource::Loading)) }
    }

    /// Mark the slot loading and return the generation this load belongs to.
    pub fn begin(&self) -> u64 {
        let mut cell = self.cell.write();
        cell.1 = Resource::Loading;
        cell.0
    }

    /// Invalidate outstanding loads (navigation away) and reset the slot.
    pub fn reset(&self) {
        let mut cell = self.cell.write();
        cell.0 += 1;
        cell.1 = Resource::Loading;
    }

    /// Install a settled resource. Returns false when the completion was
    /// stale and has been discarded.
    pub fn complete(&self, generation: u64, resource: Resource<T>) -> bool {
        let mut cell = self.cell.write();
        if cell.0 != generation {
            return false;
        }
        cell.1 = resource;
        true
    }

    pub fn is_loading(&self) -> bool { self.cell.read().1.is_loading() }
}

impl<T: Clone> PageState<T> {
    pub fn get(&self) -> Resource<T> { self.cell.read().1.clone() }

    pub fn ready(&self) -> Option<T> {
        match &self.cell.read().1 {
            Resource::Ready(v) => Some(v.clone()),
            _ => None,
        }
    }
}
