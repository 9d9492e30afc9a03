use crate::actors::commands::BotCommand;
use crate::actors::messages::SupervisorMessage;
use crate::actors::traits::InteractionLog;
use crate::error::AppError;
use crate::responder::{self, format_diary, scripts, Menu, OutboundAction};
use crate::sentiment::classifier::truncate_chars;
use crate::sentiment::SentimentClassifier;
use crate::transport::{ChatTransport, ChatUser, ConversationState, ConversationStates, InboundEvent};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{debug, error, info, instrument, warn};

/// Characters of user text kept in the log line for a classified message.
const LOG_TEXT_PREVIEW_CHARS: usize = 50;

/// Runtime switches for the dialogue.
#[derive(Debug, Clone, Copy)]
pub struct SupervisorSettings {
    /// Maximum number of entries shown by `/diary`.
    pub diary_limit: u32,
    /// When set, a failed diary write aborts the reply with an apology.
    pub strict_logging: bool,
}

impl Default for SupervisorSettings {
    fn default() -> Self {
        Self {
            diary_limit: 8,
            strict_logging: false,
        }
    }
}

/// A handle to the `SupervisorActor`.
///
/// The supervisor owns the per-user conversation states and routes every inbound
/// event through the classifier, the interaction log and the responder. Events are
/// handled one at a time, in arrival order.
#[derive(Clone)]
pub struct SupervisorHandle {
    sender: mpsc::Sender<SupervisorMessage>,
}

impl SupervisorHandle {
    /// Spawns the supervisor on the current runtime and returns a handle to it.
    pub fn spawn<T, L>(
        transport: Arc<T>,
        log: Arc<L>,
        classifier: Arc<SentimentClassifier>,
        settings: SupervisorSettings,
    ) -> Self
    where
        T: ChatTransport,
        L: InteractionLog,
    {
        let (sender, receiver) = mpsc::channel(32);
        let actor = SupervisorRunner::new(receiver, transport, log, classifier, settings);
        tokio::spawn(async move { actor.run().await });
        Self { sender }
    }

    /// Queues an event without waiting for it to be handled.
    pub async fn dispatch(&self, event: InboundEvent) -> Result<(), AppError> {
        let msg = SupervisorMessage::Inbound {
            event,
            responder: None,
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))
    }

    /// Routes an event and waits until every reply for it has been sent.
    #[allow(dead_code)]
    #[instrument(skip(self, event))]
    pub async fn process(&self, event: InboundEvent) -> Result<(), AppError> {
        let (send, recv) = oneshot::channel();
        let msg = SupervisorMessage::Inbound {
            event,
            responder: Some(send),
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(Duration::from_secs(30), recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }

    /// Stops the supervisor once the events queued before this call are handled.
    ///
    /// Resolves after the runner has left its loop.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(SupervisorMessage::Shutdown { responder: send })
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(Duration::from_secs(30), recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))
    }
}

// --- Actor Runner ---
struct SupervisorRunner<T, L>
where
    T: ChatTransport,
    L: InteractionLog,
{
    receiver: mpsc::Receiver<SupervisorMessage>,
    transport: Arc<T>,
    log: Arc<L>,
    classifier: Arc<SentimentClassifier>,
    settings: SupervisorSettings,
    states: ConversationStates,
}

impl<T, L> SupervisorRunner<T, L>
where
    T: ChatTransport,
    L: InteractionLog,
{
    fn new(
        receiver: mpsc::Receiver<SupervisorMessage>,
        transport: Arc<T>,
        log: Arc<L>,
        classifier: Arc<SentimentClassifier>,
        settings: SupervisorSettings,
    ) -> Self {
        Self {
            receiver,
            transport,
            log,
            classifier,
            settings,
            states: ConversationStates::new(),
        }
    }

    async fn run(mut self) {
        info!(transport = self.transport.id(), "Supervisor started");
        let mut stopped = None;
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SupervisorMessage::Inbound { event, responder } => {
                    let result = self.handle_event(event).await;
                    if let Err(e) = &result {
                        error!("Error handling inbound event: {}", e);
                    }
                    if let Some(responder) = responder {
                        let _ = responder.send(result);
                    }
                }
                SupervisorMessage::Shutdown { responder } => {
                    info!("Supervisor shutting down...");
                    stopped = Some(responder);
                    break;
                }
            }
        }
        info!("Supervisor stopped");
        if let Some(responder) = stopped {
            let _ = responder.send(());
        }
    }

    async fn handle_event(&mut self, event: InboundEvent) -> Result<(), AppError> {
        match event {
            InboundEvent::Message {
                chat_id,
                user,
                text,
            } => self.handle_text(chat_id, &user, &text).await,
            InboundEvent::Callback {
                callback_id,
                chat_id,
                user,
                data,
            } => self.handle_callback(&callback_id, chat_id, &user, &data).await,
        }
    }

    async fn handle_text(&mut self, chat_id: i64, user: &ChatUser, text: &str) -> Result<(), AppError> {
        if let Some(command) = BotCommand::parse(text) {
            // Any command ends a pending mood request.
            self.states.clear(user.id);
            return self.handle_command(chat_id, user, command).await;
        }

        if !self.states.is_awaiting_mood(user.id) {
            debug!(user_id = user.id, "Ignoring text outside of a mood request");
            return Ok(());
        }

        let result = self.run_mood_pipeline(chat_id, user, text).await;
        self.finish_mood_cycle(user.id);
        result
    }

    /// Returns the user to idle once a mood message has been consumed, whether or
    /// not the replies went out.
    fn finish_mood_cycle(&mut self, user_id: i64) {
        self.states.set(user_id, ConversationState::Idle);
    }

    #[instrument(skip(self, user, text), fields(user_id = user.id))]
    async fn run_mood_pipeline(&self, chat_id: i64, user: &ChatUser, text: &str) -> Result<(), AppError> {
        let result = self.classifier.classify(text).await;
        info!(
            user_id = user.id,
            sentiment = result.label.as_str(),
            score = result.score,
            source = ?result.source,
            text = truncate_chars(text, LOG_TEXT_PREVIEW_CHARS),
            "Mood classified"
        );

        if let Err(e) = self.log.record(user.id, &user.display_name, text, &result).await {
            error!(user_id = user.id, "Failed to record interaction: {}", e);
            if self.settings.strict_logging {
                if let Err(send_err) = self
                    .send(chat_id, &OutboundAction::text(scripts::PROCESSING_FAILURE_TEXT))
                    .await
                {
                    warn!(user_id = user.id, "Failed to send processing failure notice: {}", send_err);
                }
                return Err(e);
            }
        }

        for action in responder::respond(&result) {
            self.send(chat_id, &action).await?;
        }
        Ok(())
    }

    async fn handle_command(&mut self, chat_id: i64, user: &ChatUser, command: BotCommand) -> Result<(), AppError> {
        info!(user_id = user.id, ?command, "Command received");
        match command {
            BotCommand::Start => self.send(chat_id, &OutboundAction::text(scripts::START_TEXT)).await,
            BotCommand::Help => self.send(chat_id, &OutboundAction::text(scripts::HELP_TEXT)).await,
            BotCommand::Mood => {
                self.send(chat_id, &OutboundAction::text(scripts::MOOD_PROMPT))
                    .await?;
                self.states.set(user.id, ConversationState::AwaitingMood);
                Ok(())
            }
            BotCommand::Diary => {
                let body = match self.log.recent(user.id, self.settings.diary_limit).await {
                    Ok(records) => format_diary(&records),
                    Err(e) => {
                        error!(user_id = user.id, "Failed to read diary: {}", e);
                        scripts::DIARY_FAILURE_TEXT.to_string()
                    }
                };
                self.send(chat_id, &OutboundAction::text(body)).await
            }
            BotCommand::Relax => {
                self.send(chat_id, &OutboundAction::with_menu(scripts::RELAX_PROMPT, Menu::Relax))
                    .await
            }
            BotCommand::Contact => self.send(chat_id, &OutboundAction::text(scripts::CONTACTS_TEXT)).await,
        }
    }

    async fn handle_callback(
        &self,
        callback_id: &str,
        chat_id: i64,
        user: &ChatUser,
        data: &str,
    ) -> Result<(), AppError> {
        let outcome = match responder::relax_instructions(data) {
            Some(instructions) => self.send(chat_id, &OutboundAction::text(instructions)).await,
            None => {
                warn!(user_id = user.id, data, "Unknown callback token");
                Ok(())
            }
        };

        if let Err(e) = self.transport.answer_callback(callback_id).await {
            warn!("Failed to answer callback {}: {}", callback_id, e);
        }
        outcome
    }

    async fn send(&self, chat_id: i64, action: &OutboundAction) -> Result<(), AppError> {
        self.transport.send(chat_id, action).await
    }
}
