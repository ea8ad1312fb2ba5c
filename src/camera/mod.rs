//! Traffic camera snapshots.
//!
//! Optional follow-up to a current-weather reply: a frame from a public
//! traffic camera gives a rough visual of the weather. The feed endpoint
//! returns a JSON array of camera descriptors; the configured camera's
//! latest frame URL is linked with a current-millis cache buster so a fresh
//! image is served.

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::CameraConfig;

/// Camera feed errors. All of them are log-only: a missing snapshot never
/// blocks the weather reply it follows.
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("Camera feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Camera feed returned status {status}")]
    Status { status: reqwest::StatusCode },

    #[error("Failed to parse camera feed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Camera {id} not found in the feed")]
    NotFound { id: String },

    #[error("Camera {id} has no frame URL")]
    NoFrame { id: String },
}

/// One camera descriptor from the feed listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraFeed {
    #[serde(default)]
    pub public_id: String,
    #[serde(default)]
    pub name: String,
    pub content: Option<CameraContent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraContent {
    pub full_jpeg: Option<String>,
}

/// Client for the configured traffic camera feed.
#[derive(Debug, Clone)]
pub struct CameraClient {
    http: reqwest::Client,
    config: CameraConfig,
}

impl CameraClient {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch the feed listing and build the snapshot message for the
    /// configured camera.
    pub async fn snapshot_message(&self) -> Result<String, CameraError> {
        debug!("Fetching camera feed listing");

        let res = self.http.get(&self.config.feed_url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(CameraError::Status { status });
        }

        let feeds: Vec<CameraFeed> = serde_json::from_str(&res.text().await?)?;
        let feed = find_camera(&feeds, &self.config.camera_id)?;
        compose_snapshot_message(feed, Utc::now().timestamp_millis())
    }
}

fn find_camera<'a>(feeds: &'a [CameraFeed], id: &str) -> Result<&'a CameraFeed, CameraError> {
    feeds
        .iter()
        .find(|feed| feed.public_id == id)
        .ok_or_else(|| CameraError::NotFound { id: id.to_string() })
}

fn compose_snapshot_message(feed: &CameraFeed, now_ms: i64) -> Result<String, CameraError> {
    let frame = feed
        .content
        .as_ref()
        .and_then(|content| content.full_jpeg.as_deref())
        .ok_or_else(|| CameraError::NoFrame {
            id: feed.public_id.clone(),
        })?;

    Ok(format!(
        "Here's a snapshot of the current weather at {}: {}&t={}",
        feed.name, frame, now_ms
    ))
}
