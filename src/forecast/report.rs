//! Human-readable weather reports.
//!
//! Turns a [`ForecastSnapshot`] into a display string: an emoji glyph for
//! known condition codes, a summary sentence, and an optional apparent
//! temperature sentence. Pure string composition, no I/O.

use crate::forecast::model::ForecastSnapshot;

/// Which point in time a report describes. Picks the verbs used in the
/// summary and temperature sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Current,
    Tomorrow,
}

impl ReportMode {
    fn summary_verb(self) -> &'static str {
        match self {
            Self::Current => "is currently",
            Self::Tomorrow => "tomorrow will be",
        }
    }

    fn temperature_verb(self) -> &'static str {
        match self {
            Self::Current => "feels like",
            Self::Tomorrow => "will feel like",
        }
    }
}

/// Emoji for a provider condition code. Codes not in the table get no glyph.
pub fn glyph(icon: &str) -> Option<&'static str> {
    Some(match icon {
        "clear-day" => "\u{2600}",
        "clear-night" => "\u{1f31d}",
        "rain" => "\u{1f327}",
        "snow" => "\u{1f328}",
        "sleet" => "\u{2744}\u{2614}",
        "wind" => "\u{1f32c}",
        "fog" => "\u{1f32b}",
        "cloudy" => "\u{1f325}",
        "partly-cloudy-day" => "\u{1f324}",
        "partly-cloudy-night" => "\u{2601}",
        _ => return None,
    })
}

/// Render a snapshot as a report string.
///
/// The summary is lowercased and gets a closing period unless the provider
/// already supplied one. The temperature is rendered exactly as parsed.
pub fn render(snapshot: &ForecastSnapshot, mode: ReportMode) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(glyph) = snapshot.icon.as_deref().and_then(glyph) {
        parts.push(glyph.to_string());
    }

    let mut sentence = format!(
        "The weather {} {}",
        mode.summary_verb(),
        snapshot.summary.to_lowercase()
    );
    if !sentence.ends_with('.') {
        sentence.push('.');
    }
    parts.push(sentence);

    if let Some(temperature) = snapshot.apparent_temperature_f {
        parts.push(format!(
            "It {} {}\u{b0} F.",
            mode.temperature_verb(),
            temperature
        ));
    }

    parts.join(" ")
}
