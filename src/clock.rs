use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

/// Whether the host surface is currently seen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

pub trait ClockDisplay: Send + Sync {
    fn show_clock(&self, reading: &ClockReading);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    /// 12-hour time with seconds, e.g. `9:05:03 PM`.
    pub hero_time: String,
    /// 24-hour time with seconds, e.g. `21:05:03`.
    pub section_time: String,
    pub date: String,
    /// Zone name and current UTC offset, e.g. `Asia/Kolkata (UTC+05:30)`.
    pub timezone: String,
}

impl ClockReading {
    pub fn at(now: DateTime<Utc>, tz: Tz) -> Self {
        let local = now.with_timezone(&tz);
        let offset = local.offset().fix().local_minus_utc();
        let sign = if offset < 0 { '-' } else { '+' };
        let offset = offset.unsigned_abs() / 60;

        Self {
            hero_time: local.format("%-I:%M:%S %p").to_string(),
            section_time: local.format("%H:%M:%S").to_string(),
            date: local.format("%a, %b %-d, %Y").to_string(),
            timezone: format!(
                "{} (UTC{sign}{:02}:{:02})",
                tz.name(),
                offset / 60,
                offset % 60
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClockSettings {
    pub tick: Duration,
    pub timezone: Tz,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            timezone: chrono_tz::Asia::Kolkata,
        }
    }
}

/// Periodic clock refresh that pauses while the host is hidden.
pub struct ClockController {
    task_handle: Option<JoinHandle<()>>,
    cancellation_token: CancellationToken,
}

impl ClockController {
    pub fn start(
        display: Arc<dyn ClockDisplay>,
        visibility: watch::Receiver<Visibility>,
        settings: ClockSettings,
    ) -> Self {
        let cancellation_token = CancellationToken::new();
        let task_cancellation_token = cancellation_token.child_token();

        let task_handle = tokio::spawn(async move {
            run_clock(display, visibility, settings, task_cancellation_token).await
        });

        Self {
            task_handle: Some(task_handle),
            cancellation_token,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub async fn stop(mut self, timeout: Duration) {
        self.cancellation_token.cancel();
        if let Some(task_handle) = self.task_handle.take() {
            if time::timeout(timeout, task_handle).await.is_err() {
                log::warn!("Clock task did not stop within {timeout:?}");
            }
        }
    }
}

impl Drop for ClockController {
    fn drop(&mut self) {
        self.cancellation_token.cancel();
    }
}

async fn run_clock(
    display: Arc<dyn ClockDisplay>,
    mut visibility: watch::Receiver<Visibility>,
    settings: ClockSettings,
    cancellation_token: CancellationToken,
) {
    let mut watching = true;
    loop {
        if *visibility.borrow_and_update() == Visibility::Hidden {
            log::debug!("Clock paused while hidden");
            tokio::select! {
                _ = cancellation_token.cancelled() => break,
                changed = visibility.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
            continue;
        }

        // A fresh interval fires at once, so regaining visibility refreshes immediately.
        let mut ticker = time::interval(settings.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                biased;
                _ = cancellation_token.cancelled() => {
                    log::debug!("Clock stopped");
                    return;
                }
                changed = visibility.changed(), if watching => {
                    if changed.is_err() {
                        watching = false;
                    } else {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let reading = ClockReading::at(Utc::now(), settings.timezone);
                    log::trace!("Clock tick {}", reading.section_time);
                    display.show_clock(&reading);
                }
            }
        }
    }

    log::debug!("Clock stopped");
}
