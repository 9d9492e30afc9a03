pub mod commands;
pub mod interaction_log;
pub mod messages;
pub mod supervisor;
pub mod traits;

pub use interaction_log::SqliteInteractionLog;
pub use supervisor::{SupervisorHandle, SupervisorSettings};
pub use traits::InteractionLog;
