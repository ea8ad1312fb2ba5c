//! Weather provider response types and the forecast snapshot.
//!
//! The wire format is the Dark Sky response shape: a top-level `currently`
//! block for live conditions and a `daily.data` sequence of the same shape,
//! ordered from today forward.

use serde::Deserialize;

use crate::common::error::{ForecastError, ForecastResult};

/// A single point-in-time condition block as returned by the provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionBlock {
    pub summary: Option<String>,
    pub icon: Option<String>,
    pub apparent_temperature: Option<f64>,
}

/// The `daily` forecast section.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    #[serde(default)]
    pub data: Vec<ConditionBlock>,
}

/// Top-level provider response. Blocks not requested (or excluded) are absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub currently: Option<ConditionBlock>,
    pub daily: Option<DailyForecast>,
}

/// An immutable snapshot of the forecast at one point in time.
///
/// A new snapshot is fetched per request and never mutated. The icon is
/// optional (the report simply omits its glyph); a block without a summary
/// is rejected at construction so downstream formatting never sees one.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSnapshot {
    /// Provider condition code ("rain", "clear-day", ...).
    pub icon: Option<String>,
    /// Human-readable condition summary.
    pub summary: String,
    /// Apparent ("feels like") temperature in Fahrenheit.
    pub apparent_temperature_f: Option<f64>,
}

impl ForecastSnapshot {
    /// Build a snapshot from a provider condition block.
    pub fn from_block(block: ConditionBlock) -> ForecastResult<Self> {
        let summary = block.summary.ok_or(ForecastError::MissingData {
            what: "condition summary",
        })?;

        Ok(Self {
            icon: block.icon,
            summary,
            apparent_temperature_f: block.apparent_temperature,
        })
    }
}

impl ForecastResponse {
    /// Extract the live conditions snapshot from the `currently` block.
    pub fn into_current_snapshot(self) -> ForecastResult<ForecastSnapshot> {
        let block = self.currently.ok_or(ForecastError::MissingData {
            what: "currently block",
        })?;
        ForecastSnapshot::from_block(block)
    }

    /// Extract tomorrow's snapshot from the first forward-looking daily entry.
    ///
    /// A present-but-empty `daily.data` is the recoverable "no forecast for
    /// tomorrow" case; a missing `daily` section is a malformed payload.
    pub fn into_tomorrow_snapshot(self) -> ForecastResult<ForecastSnapshot> {
        let daily = self.daily.ok_or(ForecastError::MissingData {
            what: "daily block",
        })?;

        let block = daily
            .data
            .into_iter()
            .next()
            .ok_or(ForecastError::EmptyForecast)?;
        ForecastSnapshot::from_block(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ForecastResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_current_snapshot_extraction() {
        let response = parse(
            r#"{"currently": {"summary": "Rain", "icon": "rain", "apparentTemperature": 63.3}}"#,
        );

        let snapshot = response.into_current_snapshot().unwrap();
        assert_eq!(snapshot.summary, "Rain");
        assert_eq!(snapshot.icon.as_deref(), Some("rain"));
        assert_eq!(snapshot.apparent_temperature_f, Some(63.3));
    }

    #[test]
    fn test_current_snapshot_missing_block() {
        let response = parse(r#"{"daily": {"data": []}}"#);
        let err = response.into_current_snapshot().unwrap_err();
        assert!(matches!(err, ForecastError::MissingData { .. }));
    }

    #[test]
    fn test_snapshot_requires_summary() {
        let response = parse(r#"{"currently": {"icon": "rain"}}"#);
        let err = response.into_current_snapshot().unwrap_err();
        assert!(matches!(err, ForecastError::MissingData { .. }));
    }

    #[test]
    fn test_snapshot_optional_fields_absent() {
        let response = parse(r#"{"currently": {"summary": "Overcast"}}"#);
        let snapshot = response.into_current_snapshot().unwrap();
        assert_eq!(snapshot.icon, None);
        assert_eq!(snapshot.apparent_temperature_f, None);
    }

    #[test]
    fn test_tomorrow_snapshot_first_daily_entry() {
        let response = parse(
            r#"{"daily": {"data": [
                {"summary": "Snow", "icon": "snow", "apparentTemperature": 28.0},
                {"summary": "Clear", "icon": "clear-day"}
            ]}}"#,
        );

        let snapshot = response.into_tomorrow_snapshot().unwrap();
        assert_eq!(snapshot.summary, "Snow");
        assert_eq!(snapshot.icon.as_deref(), Some("snow"));
    }

    #[test]
    fn test_tomorrow_snapshot_empty_daily_is_recoverable() {
        let response = parse(r#"{"daily": {"data": []}}"#);
        let err = response.into_tomorrow_snapshot().unwrap_err();
        assert!(matches!(err, ForecastError::EmptyForecast));
    }

    #[test]
    fn test_tomorrow_snapshot_missing_daily_is_malformed() {
        let response = parse(r#"{"currently": {"summary": "Rain"}}"#);
        let err = response.into_tomorrow_snapshot().unwrap_err();
        assert!(matches!(err, ForecastError::MissingData { .. }));
    }
}
