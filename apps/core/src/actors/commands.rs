//! Slash-command parsing.

use regex::Regex;
use std::sync::LazyLock;

/// Commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    Mood,
    Diary,
    Relax,
    Contact,
}

// `/name`, optionally addressed as `/name@SomeBot`, followed by whitespace or end of text.
// NOTE: expect() is acceptable here: the pattern is a literal.
static COMMAND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/([A-Za-z_]+)(?:@[A-Za-z0-9_]+)?(?:\s|$)").expect("Invalid regex: command pattern")
});

impl BotCommand {
    /// Parses the leading command of a message. Unknown commands yield `None`
    /// and are treated as ordinary text.
    pub fn parse(text: &str) -> Option<Self> {
        let captures = COMMAND_PATTERN.captures(text.trim_start())?;
        match captures.get(1)?.as_str().to_lowercase().as_str() {
            "start" => Some(BotCommand::Start),
            "help" => Some(BotCommand::Help),
            "mood" => Some(BotCommand::Mood),
            "diary" => Some(BotCommand::Diary),
            "relax" => Some(BotCommand::Relax),
            "contact" => Some(BotCommand::Contact),
            _ => None,
        }
    }
}
