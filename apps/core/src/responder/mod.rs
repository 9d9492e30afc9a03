//! # Responder
//!
//! Turns a classification into the ordered list of messages the bot sends back.
//! Pure: no I/O, no state, cannot fail.

pub mod diary;
pub mod relax;
pub mod scripts;

pub use diary::format_diary;
pub use relax::{Menu, MenuButton, RelaxOption};

use crate::sentiment::{SentimentLabel, SentimentResult};

/// One outbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundAction {
    Text(String),
    TextWithMenu { body: String, menu: Menu },
}

impl OutboundAction {
    pub fn text(body: impl Into<String>) -> Self {
        OutboundAction::Text(body.into())
    }

    pub fn with_menu(body: impl Into<String>, menu: Menu) -> Self {
        OutboundAction::TextWithMenu {
            body: body.into(),
            menu,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            OutboundAction::Text(body) => body,
            OutboundAction::TextWithMenu { body, .. } => body,
        }
    }

    pub fn menu(&self) -> Option<Menu> {
        match self {
            OutboundAction::Text(_) => None,
            OutboundAction::TextWithMenu { menu, .. } => Some(*menu),
        }
    }
}

/// Selects the reply flow for a classified mood message.
///
/// - positive: one text with the music link;
/// - neutral: one text with the relax menu;
/// - negative: support text, relax menu, crisis contacts, in that order.
pub fn respond(result: &SentimentResult) -> Vec<OutboundAction> {
    match result.label {
        SentimentLabel::Positive => vec![OutboundAction::text(scripts::positive_reply(
            result.score,
        ))],
        SentimentLabel::Neutral => vec![OutboundAction::with_menu(
            scripts::neutral_reply(result.score),
            Menu::Relax,
        )],
        SentimentLabel::Negative => vec![
            OutboundAction::text(scripts::negative_support(result.score)),
            OutboundAction::with_menu(scripts::NEGATIVE_MENU_PROMPT, Menu::Relax),
            OutboundAction::text(scripts::CONTACTS_TEXT),
        ],
    }
}

/// Instruction text for a menu callback token; `None` for tokens outside the menu.
pub fn relax_instructions(token: &str) -> Option<&'static str> {
    RelaxOption::from_token(token).map(|option| option.instructions())
}
