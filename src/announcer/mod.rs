//! Daily weather change announcements.
//!
//! A recurring check re-fetches the current forecast, compares its condition
//! code against the last one observed, and announces when they differ. The
//! baseline lives only in memory: after a restart the first observation arms
//! the detector without announcing anything.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};

use crate::discord::state::BotState;
use crate::forecast::{render, ForecastSnapshot, ReportMode};

/// Preamble for change announcements; the Current-mode report follows.
const CHANGE_PREAMBLE: &str =
    "Hey everybody, it looks like there is a change in weather from yesterday.";

/// Change detector state.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AnnouncerState {
    /// No baseline observed yet.
    Idle,
    /// Baseline recorded; differing observations trigger announcements.
    Armed { baseline: Option<String> },
}

/// Detects day-over-day changes in the provider's condition code.
#[derive(Debug, Clone)]
pub struct ChangeAnnouncer {
    state: AnnouncerState,
}

impl ChangeAnnouncer {
    pub fn new() -> Self {
        Self {
            state: AnnouncerState::Idle,
        }
    }

    /// Record an observation. Returns true iff an announcement should go
    /// out: a baseline exists and the condition code differs from it.
    ///
    /// The baseline is always rebased to the new observation, announcement
    /// or not. The very first observation only arms the detector.
    pub fn observe(&mut self, snapshot: &ForecastSnapshot) -> bool {
        let icon = snapshot.icon.clone();

        let changed = match &self.state {
            AnnouncerState::Idle => false,
            AnnouncerState::Armed { baseline } => *baseline != icon,
        };

        self.state = AnnouncerState::Armed { baseline: icon };
        changed
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, AnnouncerState::Armed { .. })
    }
}

impl Default for ChangeAnnouncer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch the initial baseline, once, at startup.
///
/// Failure is not fatal: the announcer stays idle and the first successful
/// scheduled check arms it silently instead.
pub async fn arm_baseline(state: &BotState) {
    match state.forecast.fetch_current().await {
        Ok(snapshot) => {
            state.announcer.lock().await.observe(&snapshot);
            info!("Armed weather change baseline: {:?}", snapshot.icon);
        }
        Err(e) => {
            warn!("Couldn't fetch the initial forecast baseline: {}", e);
        }
    }
}

/// One scheduled tick: fetch, compare, announce on change.
///
/// A failed fetch leaves the baseline untouched; the next tick simply tries
/// again. The announcement goes to the channel the bot was last addressed
/// in and is dropped by the send gate while disconnected.
pub async fn run_daily_check(state: &BotState) {
    info!("Checking if today's forecast is different from yesterday's...");

    let snapshot = match state.forecast.fetch_current().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Couldn't fetch the current forecast: {}", e);
            return;
        }
    };

    let changed = state.announcer.lock().await.observe(&snapshot);
    if changed {
        let announcement = format!(
            "{}\n{}",
            CHANGE_PREAMBLE,
            render(&snapshot, ReportMode::Current)
        );
        state.send_to_last_channel(&announcement).await;
    }
}

/// Register the recurring daily check with the scheduler.
///
/// The cron expression is evaluated in `Local` time: the configured hour is
/// a wall-clock hour at the deployment, not UTC.
pub async fn schedule_daily_check(
    scheduler: &JobScheduler,
    state: Arc<BotState>,
    cron_expr: &str,
) -> Result<()> {
    let job = Job::new_async_tz(cron_expr, Local, move |_uuid, _lock| {
        let state = state.clone();
        Box::pin(async move {
            run_daily_check(&state).await;
        })
    })
    .with_context(|| format!("Failed to create daily check job: {}", cron_expr))?;

    scheduler
        .add(job)
        .await
        .context("Failed to add daily check job")?;

    info!("Scheduled daily weather check with cron: {}", cron_expr);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(icon: Option<&str>) -> ForecastSnapshot {
        ForecastSnapshot {
            icon: icon.map(String::from),
            summary: "whatever".to_string(),
            apparent_temperature_f: None,
        }
    }

    #[test]
    fn test_first_observation_arms_without_announcing() {
        let mut announcer = ChangeAnnouncer::new();
        assert!(!announcer.is_armed());

        assert!(!announcer.observe(&snapshot(Some("rain"))));
        assert!(announcer.is_armed());
    }

    #[test]
    fn test_change_announces_and_rebases() {
        let mut announcer = ChangeAnnouncer::new();
        announcer.observe(&snapshot(Some("rain")));

        assert!(announcer.observe(&snapshot(Some("snow"))));
        // Baseline moved to "snow": seeing it again is not a change
        assert!(!announcer.observe(&snapshot(Some("snow"))));
    }

    #[test]
    fn test_same_code_stays_silent() {
        let mut announcer = ChangeAnnouncer::new();
        announcer.observe(&snapshot(Some("rain")));
        assert!(!announcer.observe(&snapshot(Some("rain"))));
    }

    #[test]
    fn test_flap_back_announces_again() {
        let mut announcer = ChangeAnnouncer::new();
        announcer.observe(&snapshot(Some("rain")));
        assert!(announcer.observe(&snapshot(Some("snow"))));
        assert!(announcer.observe(&snapshot(Some("rain"))));
    }

    #[test]
    fn test_absent_icon_counts_as_a_value() {
        let mut announcer = ChangeAnnouncer::new();
        announcer.observe(&snapshot(Some("rain")));

        assert!(announcer.observe(&snapshot(None)));
        assert!(!announcer.observe(&snapshot(None)));
        assert!(announcer.observe(&snapshot(Some("rain"))));
    }

    #[test]
    fn test_daily_check_registers_against_local_clock() {
        use crate::config::ForecastConfig;
        use crate::forecast::ForecastClient;

        tokio_test::block_on(async {
            let forecast = ForecastClient::new(ForecastConfig {
                api_key: "test".to_string(),
                base_url: "http://localhost:9".to_string(),
                latitude: 0.0,
                longitude: 0.0,
            });
            let state = Arc::new(BotState::new(forecast, None));

            let scheduler = JobScheduler::new().await.unwrap();
            // A wall-clock 09:00 expression must be accepted as-is; the job
            // carries the local timezone rather than the scheduler's UTC
            // default.
            schedule_daily_check(&scheduler, state, "0 0 9 * * *")
                .await
                .unwrap();
        });
    }
}
