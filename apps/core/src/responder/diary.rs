use super::scripts::DIARY_EMPTY_TEXT;
use crate::models::EmotionRecord;
use crate::sentiment::classifier::truncate_chars;

/// Entries longer than this many characters are shortened with `...`.
pub const DIARY_PREVIEW_CHARS: usize = 120;

const DIARY_HEADER: &str = "Останні записи:";

/// Renders diary entries (already newest first) into one message.
pub fn format_diary(records: &[EmotionRecord]) -> String {
    if records.is_empty() {
        return DIARY_EMPTY_TEXT.to_string();
    }

    let mut out = String::from(DIARY_HEADER);
    for record in records {
        out.push_str("\n\n");
        out.push_str(&format_entry(record));
    }
    out
}

fn format_entry(record: &EmotionRecord) -> String {
    let created = record
        .created_at_utc()
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| record.created_at.to_string());

    let short = truncate_chars(&record.text, DIARY_PREVIEW_CHARS);
    let ellipsis = if short.len() < record.text.len() { "..." } else { "" };

    format!(
        "{} — [{} {:.2}] {}{}",
        created, record.sentiment, record.score, short, ellipsis
    )
}
