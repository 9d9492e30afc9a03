use crate::error::AppError;
use crate::responder::OutboundAction;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Sender of an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    pub id: i64,
    /// Platform handle; empty when the user has none.
    pub display_name: String,
}

/// Event delivered by a chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A text message (commands included).
    Message {
        chat_id: i64,
        user: ChatUser,
        text: String,
    },
    /// A press on an inline menu button.
    Callback {
        callback_id: String,
        chat_id: i64,
        user: ChatUser,
        data: String,
    },
}

impl InboundEvent {
    pub fn user(&self) -> &ChatUser {
        match self {
            InboundEvent::Message { user, .. } => user,
            InboundEvent::Callback { user, .. } => user,
        }
    }
}

/// Chat transport contract. New platforms only need to implement this trait.
#[async_trait]
pub trait ChatTransport: Send + Sync + 'static {
    /// Stable transport identifier (e.g. `telegram`).
    fn id(&self) -> &'static str;

    /// Delivers one outbound action to a chat.
    async fn send(&self, chat_id: i64, action: &OutboundAction) -> Result<(), AppError>;

    /// Acknowledges a menu press so the client stops its loading indicator.
    async fn answer_callback(&self, callback_id: &str) -> Result<(), AppError>;

    /// Receives inbound events until the channel closes.
    async fn run(&self, inbound_tx: mpsc::Sender<InboundEvent>) -> Result<(), AppError>;
}
