//! Inbound message classification.
//!
//! Normalizes raw message text and maps it to one of a closed set of
//! intents. This is substring matching, not tokenized parsing: "weather
//! tomorrow now" matches both phrases, and "now" wins.

/// How many characters of an unrecognized command are kept for logging.
const UNKNOWN_PREVIEW_LEN: usize = 20;

/// What an inbound message is asking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    CurrentWeather,
    TomorrowWeather,
    Help,
    /// Addressed to us but unrecognized; carries a bounded preview of the
    /// normalized text for logging.
    Unknown(String),
    /// Not addressed to us (or we don't know our own identity yet).
    NotMentioned,
}

/// Classify a raw inbound message.
///
/// Case-insensitive and whitespace-forgiving. Without a mention token (the
/// bot hasn't authenticated yet) every message is `NotMentioned`.
pub fn classify(raw: &str, mention_token: Option<&str>) -> Intent {
    let normalized = raw.trim().to_lowercase();

    let token = match mention_token {
        Some(token) if !token.is_empty() => token.to_lowercase(),
        _ => return Intent::NotMentioned,
    };

    if !normalized.contains(&token) {
        return Intent::NotMentioned;
    }

    if normalized.contains("weather now") {
        return Intent::CurrentWeather;
    }
    if normalized.contains("weather tomorrow") {
        return Intent::TomorrowWeather;
    }
    if normalized.contains("help") {
        return Intent::Help;
    }

    Intent::Unknown(normalized.chars().take(UNKNOWN_PREVIEW_LEN).collect())
}
