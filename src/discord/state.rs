//! Shared bot state.
//!
//! Every mutable cell the event handlers touch lives here as an explicit
//! field behind its own lock: the connection tracker, the last channel the
//! bot was addressed in, the stashed HTTP client, and the change
//! announcer's baseline. Handlers and the scheduled job share this via
//! `Arc`.

use std::sync::Arc;

use serenity::http::Http;
use serenity::model::id::ChannelId;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error};

use crate::announcer::ChangeAnnouncer;
use crate::camera::CameraClient;
use crate::discord::connection::ConnectionTracker;
use crate::forecast::ForecastClient;

pub struct BotState {
    /// Weather provider client, shared by the command and scheduled paths.
    pub forecast: ForecastClient,
    /// Optional traffic camera follow-up for current-weather replies.
    pub camera: Option<CameraClient>,
    /// Change-detection baseline, owned solely by the announcer flow.
    pub announcer: Mutex<ChangeAnnouncer>,
    /// Connection lifecycle tracker and send gate.
    pub tracker: RwLock<ConnectionTracker>,
    /// Channel the bot was last addressed in; announcements go there.
    pub last_channel: RwLock<Option<ChannelId>>,
    /// HTTP client captured from the gateway context once ready.
    pub http: RwLock<Option<Arc<Http>>>,
}

impl BotState {
    pub fn new(forecast: ForecastClient, camera: Option<CameraClient>) -> Self {
        Self {
            forecast,
            camera,
            announcer: Mutex::new(ChangeAnnouncer::new()),
            tracker: RwLock::new(ConnectionTracker::new()),
            last_channel: RwLock::new(None),
            http: RwLock::new(None),
        }
    }

    /// Send a message if the connection is ready, otherwise drop it.
    ///
    /// Messages are never queued or retried; a send before the connection
    /// opens (or after it drops) simply disappears with a debug log.
    pub async fn send(&self, channel: ChannelId, text: &str) {
        if !self.tracker.read().await.is_send_ready() {
            debug!("Dropping outbound message: connection not ready");
            return;
        }

        let http = self.http.read().await.clone();
        let Some(http) = http else {
            debug!("Dropping outbound message: no HTTP client yet");
            return;
        };

        if let Err(e) = channel.say(&http, text).await {
            error!("Failed to send message to channel {}: {}", channel, e);
        }
    }

    /// Send to the channel the bot was last addressed in, if any.
    pub async fn send_to_last_channel(&self, text: &str) {
        let channel = *self.last_channel.read().await;
        match channel {
            Some(channel) => self.send(channel, text).await,
            None => debug!("No channel known yet; dropping message"),
        }
    }
}
