//! Environment variable configuration.
//!
//! All configuration comes from the environment:
//! - `WEATHERVANE_DISCORD_TOKEN` - Discord bot token (required)
//! - `WEATHERVANE_FORECAST_TOKEN` - weather provider API key (required)
//! - `WEATHERVANE_FORECAST_URL` - Dark Sky-compatible base URL
//! - `WEATHERVANE_LATITUDE` / `WEATHERVANE_LONGITUDE` - area of interest
//! - `WEATHERVANE_ANNOUNCE_HOUR` - local hour for the daily check
//! - `WEATHERVANE_CAMERA_FEED_URL` - traffic camera feed (enables snapshots)
//! - `WEATHERVANE_CAMERA_ID` - public id of the camera to link

use std::env;

use crate::common::error::{ConfigError, ConfigResult};
use crate::config::types::{AnnouncerConfig, CameraConfig, Config, DiscordConfig, ForecastConfig};

/// Environment variable prefix for all config values.
const ENV_PREFIX: &str = "WEATHERVANE";

/// Default forecast endpoint (Dark Sky wire format).
const DEFAULT_FORECAST_URL: &str = "https://api.pirateweather.net/forecast";

/// Default coordinates: the Washington, DC area this bot reports on.
const DEFAULT_LATITUDE: f64 = 38.889_268_1;
const DEFAULT_LONGITUDE: f64 = -77.050_142_5;

/// Default local hour for the daily change check.
const DEFAULT_ANNOUNCE_HOUR: u8 = 9;

/// Default camera: 14th St & Independence Ave NW, near the default coordinates.
const DEFAULT_CAMERA_ID: &str = "200146";

/// Load the full configuration from the environment.
///
/// Missing credentials are fatal; everything else falls back to defaults.
pub fn load_config() -> ConfigResult<Config> {
    let token = require_var("DISCORD_TOKEN")?;
    let api_key = require_var("FORECAST_TOKEN")?;

    let base_url = optional_var("FORECAST_URL").unwrap_or_else(|| DEFAULT_FORECAST_URL.to_string());

    let latitude = parse_latitude(optional_var("LATITUDE"))?;
    let longitude = parse_longitude(optional_var("LONGITUDE"))?;
    let hour = parse_announce_hour(optional_var("ANNOUNCE_HOUR"))?;

    // Camera snapshots are opt-in: no feed URL, no feature
    let camera = build_camera_config(optional_var("CAMERA_FEED_URL"), optional_var("CAMERA_ID"));

    Ok(Config {
        discord: DiscordConfig { token },
        forecast: ForecastConfig {
            api_key,
            base_url,
            latitude,
            longitude,
        },
        announcer: AnnouncerConfig { hour },
        camera,
    })
}

fn build_camera_config(feed_url: Option<String>, camera_id: Option<String>) -> Option<CameraConfig> {
    feed_url.map(|feed_url| CameraConfig {
        feed_url,
        camera_id: camera_id.unwrap_or_else(|| DEFAULT_CAMERA_ID.to_string()),
    })
}

/// Read a required variable; unset or empty is a `ConfigError`.
fn require_var(suffix: &str) -> ConfigResult<String> {
    let name = format!("{}_{}", ENV_PREFIX, suffix);
    match env::var(&name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar { name }),
    }
}

/// Read an optional variable; unset or empty means "use the default".
fn optional_var(suffix: &str) -> Option<String> {
    env::var(format!("{}_{}", ENV_PREFIX, suffix))
        .ok()
        .filter(|value| !value.is_empty())
}

fn parse_latitude(value: Option<String>) -> ConfigResult<f64> {
    parse_in_range(value, "LATITUDE", DEFAULT_LATITUDE, -90.0, 90.0)
}

fn parse_longitude(value: Option<String>) -> ConfigResult<f64> {
    parse_in_range(value, "LONGITUDE", DEFAULT_LONGITUDE, -180.0, 180.0)
}

fn parse_in_range(
    value: Option<String>,
    suffix: &str,
    default: f64,
    min: f64,
    max: f64,
) -> ConfigResult<f64> {
    let Some(raw) = value else {
        return Ok(default);
    };

    let name = format!("{}_{}", ENV_PREFIX, suffix);
    let parsed: f64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
        name: name.clone(),
        message: format!("'{}' is not a number", raw),
    })?;

    if !(min..=max).contains(&parsed) {
        return Err(ConfigError::InvalidValue {
            name,
            message: format!("{} is outside {}..{}", parsed, min, max),
        });
    }

    Ok(parsed)
}

fn parse_announce_hour(value: Option<String>) -> ConfigResult<u8> {
    let Some(raw) = value else {
        return Ok(DEFAULT_ANNOUNCE_HOUR);
    };

    let name = format!("{}_ANNOUNCE_HOUR", ENV_PREFIX);
    let parsed: u8 = raw.parse().map_err(|_| ConfigError::InvalidValue {
        name: name.clone(),
        message: format!("'{}' is not an hour", raw),
    })?;

    if parsed > 23 {
        return Err(ConfigError::InvalidValue {
            name,
            message: format!("{} is outside 0..23", parsed),
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_prefix() {
        assert_eq!(ENV_PREFIX, "WEATHERVANE");
    }

    #[test]
    fn test_latitude_default() {
        let lat = parse_latitude(None).unwrap();
        assert!((lat - DEFAULT_LATITUDE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_latitude_parsed() {
        let lat = parse_latitude(Some("51.5".to_string())).unwrap();
        assert!((lat - 51.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_latitude_out_of_range() {
        assert!(parse_latitude(Some("91.0".to_string())).is_err());
        assert!(parse_latitude(Some("-90.5".to_string())).is_err());
    }

    #[test]
    fn test_longitude_not_a_number() {
        let err = parse_longitude(Some("east".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_camera_config_opt_in() {
        assert!(build_camera_config(None, None).is_none());
        assert!(build_camera_config(None, Some("123".to_string())).is_none());

        let camera = build_camera_config(Some("http://cams.example/feed".to_string()), None).unwrap();
        assert_eq!(camera.camera_id, DEFAULT_CAMERA_ID);

        let camera = build_camera_config(
            Some("http://cams.example/feed".to_string()),
            Some("100001".to_string()),
        )
        .unwrap();
        assert_eq!(camera.camera_id, "100001");
    }

    #[test]
    fn test_announce_hour_default_and_bounds() {
        assert_eq!(parse_announce_hour(None).unwrap(), DEFAULT_ANNOUNCE_HOUR);
        assert_eq!(parse_announce_hour(Some("0".to_string())).unwrap(), 0);
        assert_eq!(parse_announce_hour(Some("23".to_string())).unwrap(), 23);
        assert!(parse_announce_hour(Some("24".to_string())).is_err());
        assert!(parse_announce_hour(Some("noon".to_string())).is_err());
    }
}
