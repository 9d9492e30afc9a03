//! Telegram Bot API transport using long polling (`getUpdates`).

use super::traits::{ChatTransport, ChatUser, InboundEvent};
use crate::config::BotConfig;
use crate::error::AppError;
use crate::responder::{Menu, OutboundAction};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Pause after a failed `getUpdates` before polling again.
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(3);

/// Extra slack on top of the long-poll duration for the HTTP timeout.
const HTTP_TIMEOUT_SLACK: Duration = Duration::from_secs(10);

/// Telegram rejects texts over 4096 UTF-16 code units; keep some margin.
pub const MAX_MESSAGE_UNITS: usize = 4000;

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<TgMessage>,
    callback_query: Option<TgCallbackQuery>,
}

#[derive(Debug, Deserialize)]
struct TgMessage {
    chat: TgChat,
    from: Option<TgUser>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TgChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct TgUser {
    id: i64,
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TgCallbackQuery {
    id: String,
    from: TgUser,
    message: Option<TgMessage>,
    data: Option<String>,
}

impl From<TgUser> for ChatUser {
    fn from(user: TgUser) -> Self {
        ChatUser {
            id: user.id,
            display_name: user.username.unwrap_or_default(),
        }
    }
}

impl Update {
    /// Maps a raw update onto an inbound event; other update kinds are dropped.
    fn into_event(self) -> Option<InboundEvent> {
        if let Some(message) = self.message {
            let user = message.from?;
            return Some(InboundEvent::Message {
                chat_id: message.chat.id,
                user: user.into(),
                text: message.text.unwrap_or_default(),
            });
        }

        let query = self.callback_query?;
        let chat_id = query
            .message
            .as_ref()
            .map(|m| m.chat.id)
            .unwrap_or(query.from.id);
        Some(InboundEvent::Callback {
            callback_id: query.id,
            chat_id,
            user: query.from.into(),
            data: query.data.unwrap_or_default(),
        })
    }
}

/// Splits `text` into chunks of at most `max_units` UTF-16 code units.
///
/// Breaks on the last newline, then the last space, before the limit; a chunk
/// without either is cut at the limit on a char boundary.
pub fn split_message(text: &str, max_units: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut remaining = text;

    while remaining.encode_utf16().count() > max_units {
        let mut units = 0;
        let mut hard = remaining.len();
        for (idx, ch) in remaining.char_indices() {
            if units + ch.len_utf16() > max_units {
                hard = idx;
                break;
            }
            units += ch.len_utf16();
        }
        if hard == 0 {
            hard = remaining.chars().next().map_or(remaining.len(), char::len_utf8);
        }

        let head = &remaining[..hard];
        let split_at = head
            .rfind('\n')
            .or_else(|| head.rfind(' '))
            .filter(|&idx| idx > 0)
            .unwrap_or(hard);
        chunks.push(remaining[..split_at].to_string());
        remaining = remaining[split_at..].trim_start();
    }

    if !remaining.is_empty() || chunks.is_empty() {
        chunks.push(remaining.to_string());
    }
    chunks
}

fn reply_markup(menu: Menu) -> Value {
    let rows: Vec<Value> = menu
        .buttons()
        .into_iter()
        .map(|button| json!([{ "text": button.title, "callback_data": button.token }]))
        .collect();
    json!({ "inline_keyboard": rows })
}

pub struct TelegramTransport {
    client: Client,
    /// `{api_url}/bot{token}`
    api_base: String,
    poll_timeout_secs: u64,
}

impl TelegramTransport {
    pub fn new(api_url: &str, bot_token: &str, poll_timeout_secs: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs) + HTTP_TIMEOUT_SLACK)
            .build()?;
        Ok(Self {
            client,
            api_base: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token),
            poll_timeout_secs,
        })
    }

    pub fn from_config(config: &BotConfig) -> Result<Self, AppError> {
        Self::new(
            &config.telegram_api_url,
            &config.bot_token,
            config.poll_timeout_secs,
        )
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: Value) -> Result<T, AppError> {
        let url = format!("{}/{}", self.api_base, method);
        let response: ApiResponse<T> = self.client.post(&url).json(&body).send().await?.json().await?;

        if !response.ok {
            return Err(AppError::Transport(format!(
                "{} failed: {}",
                method,
                response.description.unwrap_or_else(|| "no description".to_string())
            )));
        }
        response
            .result
            .ok_or_else(|| AppError::Transport(format!("{} returned no result", method)))
    }

    /// Fetches one batch of updates starting at `offset`.
    ///
    /// Returns the events and the offset to use for the next call.
    pub async fn poll_once(&self, offset: i64) -> Result<(Vec<InboundEvent>, i64), AppError> {
        let updates: Vec<Update> = self
            .call(
                "getUpdates",
                json!({
                    "offset": offset,
                    "timeout": self.poll_timeout_secs,
                    "allowed_updates": ["message", "callback_query"],
                }),
            )
            .await?;

        let next_offset = updates
            .iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(offset);
        let events = updates.into_iter().filter_map(Update::into_event).collect();
        Ok((events, next_offset))
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    fn id(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, chat_id: i64, action: &OutboundAction) -> Result<(), AppError> {
        let chunks = split_message(action.body(), MAX_MESSAGE_UNITS);
        let last = chunks.len() - 1;
        for (i, chunk) in chunks.into_iter().enumerate() {
            let mut body = json!({ "chat_id": chat_id, "text": chunk });
            // The menu goes under the final chunk.
            if i == last {
                if let Some(menu) = action.menu() {
                    body["reply_markup"] = reply_markup(menu);
                }
            }
            let _: Value = self.call("sendMessage", body).await?;
        }
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), AppError> {
        let _: Value = self
            .call(
                "answerCallbackQuery",
                json!({ "callback_query_id": callback_id }),
            )
            .await?;
        Ok(())
    }

    async fn run(&self, inbound_tx: mpsc::Sender<InboundEvent>) -> Result<(), AppError> {
        info!("Telegram polling started");
        let mut offset = 0;

        loop {
            match self.poll_once(offset).await {
                Ok((events, next_offset)) => {
                    offset = next_offset;
                    for event in events {
                        debug!(user_id = event.user().id, "Inbound event");
                        if inbound_tx.send(event).await.is_err() {
                            info!("Inbound channel closed, stopping polling");
                            return Ok(());
                        }
                    }
                }
                Err(e) => {
                    warn!("getUpdates failed: {}", e);
                    tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                }
            }
        }
    }
}
