//! Discord event handling.
//!
//! Drives the connection tracker from gateway lifecycle events and
//! dispatches inbound messages by intent. Fetch failures on the command
//! path are logged and produce no reply, with one exception: an empty
//! tomorrow forecast gets an explanatory message.

use std::sync::Arc;

use serenity::async_trait;
use serenity::gateway::{ConnectionStage, ShardStageUpdateEvent};
use serenity::model::channel::Message;
use serenity::model::event::ResumedEvent;
use serenity::model::gateway::Ready;
use serenity::model::id::{GuildId, UserId};
use serenity::prelude::*;
use tracing::{error, info, warn};

use crate::common::error::ForecastError;
use crate::discord::intent::{classify, Intent};
use crate::discord::state::BotState;
use crate::forecast::{render, ReportMode};

/// Reply for an empty tomorrow forecast. The sole user-visible fetch failure.
const EMPTY_FORECAST_REPLY: &str = "There is no forecast for tomorrow! The end is nigh.";

fn help_reply(user: UserId) -> String {
    format!("<@{}>, try 'weather now' or 'weather tomorrow'", user)
}

fn unknown_reply(user: UserId) -> String {
    format!(
        "<@{}>, I did not understand that command, try 'weather now' or 'weather tomorrow'",
        user
    )
}

/// Discord event handler.
pub struct WeatherHandler {
    state: Arc<BotState>,
}

impl WeatherHandler {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }

    async fn reply_current(&self, msg: &Message) {
        match self.state.forecast.fetch_current().await {
            Ok(snapshot) => {
                let report = render(&snapshot, ReportMode::Current);
                self.state.send(msg.channel_id, &report).await;
                self.follow_up_with_snapshot(msg).await;
            }
            Err(e) => error!("Couldn't fetch the current forecast: {}", e),
        }
    }

    /// Chase a successful current-weather reply with a traffic camera
    /// frame, when a camera feed is configured. A camera failure never
    /// disturbs the weather reply that already went out.
    async fn follow_up_with_snapshot(&self, msg: &Message) {
        let Some(camera) = &self.state.camera else {
            return;
        };
        match camera.snapshot_message().await {
            Ok(message) => self.state.send(msg.channel_id, &message).await,
            Err(e) => error!("Couldn't fetch a camera snapshot: {}", e),
        }
    }

    async fn reply_tomorrow(&self, msg: &Message) {
        match self.state.forecast.fetch_tomorrow_noon().await {
            Ok(snapshot) => {
                let report = render(&snapshot, ReportMode::Tomorrow);
                self.state.send(msg.channel_id, &report).await;
            }
            Err(ForecastError::EmptyForecast) => {
                self.state.send(msg.channel_id, EMPTY_FORECAST_REPLY).await;
            }
            Err(e) => error!("Couldn't fetch tomorrow's forecast: {}", e),
        }
    }
}

#[async_trait]
impl EventHandler for WeatherHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            "Logged in as {} ({}), waiting for the connection to open",
            ready.user.name, ready.user.id
        );

        self.state
            .tracker
            .write()
            .await
            .on_authenticated(&ready.user.id.to_string());

        *self.state.http.write().await = Some(ctx.http.clone());
    }

    async fn cache_ready(&self, _ctx: Context, guilds: Vec<GuildId>) {
        info!("Connection open ({} guild(s)); ready to send", guilds.len());
        self.state.tracker.write().await.on_connection_opened();
    }

    async fn resume(&self, _ctx: Context, _resumed: ResumedEvent) {
        info!("Gateway session resumed");
        self.state.tracker.write().await.on_connection_opened();
    }

    async fn shard_stage_update(&self, _ctx: Context, event: ShardStageUpdateEvent) {
        if event.new == ConnectionStage::Disconnected {
            warn!("Gateway disconnected");
            self.state.tracker.write().await.on_disconnected();
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Ignore our own messages and other bots
        if msg.author.bot || msg.author.id == ctx.cache.current_user().id {
            return;
        }

        let token = self.state.tracker.read().await.mention_token();
        let intent = classify(&msg.content, token.as_deref());

        if intent == Intent::NotMentioned {
            return;
        }

        // Respond on the channel we were mentioned in; the daily announcer
        // reuses it as the most recent point of contact.
        *self.state.last_channel.write().await = Some(msg.channel_id);

        match intent {
            Intent::CurrentWeather => self.reply_current(&msg).await,
            Intent::TomorrowWeather => self.reply_tomorrow(&msg).await,
            Intent::Help => {
                self.state
                    .send(msg.channel_id, &help_reply(msg.author.id))
                    .await;
            }
            Intent::Unknown(preview) => {
                info!("Ignoring unknown command: {}...", preview);
                self.state
                    .send(msg.channel_id, &unknown_reply(msg.author.id))
                    .await;
            }
            Intent::NotMentioned => {}
        }
    }
}
