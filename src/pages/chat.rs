use parking_lot::RwLock;

use crate::api::models::{ChatRequest, ChatReply};
use crate::api::ApiClient;

use super::Notices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    You,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

/// AI assistant chat. The transcript lives entirely client-side; each send
/// is one POST and the reply is appended when it arrives. A failed send
/// keeps the user's message in the transcript so the exchange reads true.
pub struct ChatPage {
    transcript: RwLock<Vec<ChatTurn>>,
    tender_id: RwLock<Option<String>>,
    pub notices: Notices,
}

impl Default for ChatPage {
    fn default() -> Self { Self::new() }
}

impl ChatPage {
    pub fn new() -> Self {
        Self {
            transcript: RwLock::new(Vec::new()),
            tender_id: RwLock::new(None),
            notices: Notices::new(),
        }
    }

    /// Scope the conversation to one tender, or clear the scope.
    pub fn set_tender(&self, tender_id: Option<String>) {
        *self.tender_id.write() = tender_id;
    }

    pub async fn send(&self, api: &ApiClient, message: &str) {
        self.transcript.write().push(ChatTurn { speaker: Speaker::You, text: message.to_string() });
        let req = ChatRequest {
            tender_id: self.tender_id.read().clone(),
            message: message.to_string(),
        };
        match api.post_json::<ChatReply, _>("chat", &req).await {
            Ok(reply) => {
                self.transcript
                    .write()
                    .push(ChatTurn { speaker: Speaker::Assistant, text: reply.response });
            }
            Err(e) => {
                tracing::warn!(target: "hexabid::api", "chat send failed: {}", e);
                self.notices.error("Failed to send message");
            }
        }
    }

    pub fn transcript(&self) -> Vec<ChatTurn> {
        self.transcript.read().clone()
    }
}
