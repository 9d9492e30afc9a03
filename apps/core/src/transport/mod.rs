pub mod conversation;
pub mod telegram;
pub mod traits;

pub use conversation::{ConversationState, ConversationStates};
pub use telegram::TelegramTransport;
pub use traits::{ChatTransport, ChatUser, InboundEvent};
