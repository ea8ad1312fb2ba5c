//! Configuration types.

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord: DiscordConfig,
    pub forecast: ForecastConfig,
    pub announcer: AnnouncerConfig,
    /// Optional traffic camera follow-up for current-weather replies.
    pub camera: Option<CameraConfig>,
}

/// Discord connection settings.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    /// Bot token.
    pub token: String,
}

/// Weather provider settings.
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    /// Provider API key.
    pub api_key: String,
    /// Base URL of a Dark Sky-compatible forecast endpoint.
    pub base_url: String,
    /// Latitude of the fixed area of interest.
    pub latitude: f64,
    /// Longitude of the fixed area of interest.
    pub longitude: f64,
}

/// Traffic camera snapshot settings.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Camera feed listing endpoint (JSON array of camera descriptors).
    pub feed_url: String,
    /// Public id of the camera to link frames from.
    pub camera_id: String,
}

/// Daily change announcer settings.
#[derive(Debug, Clone)]
pub struct AnnouncerConfig {
    /// Local hour (0-23) at which the daily check runs.
    pub hour: u8,
}

impl AnnouncerConfig {
    /// Six-field cron expression for the daily check.
    ///
    /// The scheduler evaluates this against local time, so `hour` is the
    /// wall-clock hour at the deployment.
    pub fn cron_expression(&self) -> String {
        format!("0 0 {} * * *", self.hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cron_expression() {
        let announcer = AnnouncerConfig { hour: 9 };
        assert_eq!(announcer.cron_expression(), "0 0 9 * * *");

        let midnight = AnnouncerConfig { hour: 0 };
        assert_eq!(midnight.cron_expression(), "0 0 0 * * *");
    }
}
