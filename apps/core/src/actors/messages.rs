use crate::error::AppError;
use crate::transport::InboundEvent;
use tokio::sync::oneshot;

/// Messages that can be sent to the `SupervisorActor`.
#[derive(Debug)]
pub enum SupervisorMessage {
    /// An inbound chat event to route through the dialogue.
    Inbound {
        event: InboundEvent,
        /// Present when the caller waits for the event to be fully handled.
        responder: Option<oneshot::Sender<Result<(), AppError>>>,
    },
    /// A command to stop the supervisor after the events already queued.
    Shutdown { responder: oneshot::Sender<()> },
}
