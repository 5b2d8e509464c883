use std::{sync::Arc, time::Duration};

use tokio::sync::watch;

use crate::{
    client::ReminderClient,
    clock::{ClockController, ClockDisplay, ClockSettings, Visibility},
};

const CLOCK_STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything that lives from page activation to teardown.
pub struct Session {
    client: Arc<ReminderClient>,
    clock: ClockController,
}

impl Session {
    /// Loads the reminder list and starts the clock.
    pub async fn activate(
        client: Arc<ReminderClient>,
        clock_display: Arc<dyn ClockDisplay>,
        visibility: watch::Receiver<Visibility>,
        clock_settings: ClockSettings,
    ) -> Self {
        log::info!("Activating reminder session");
        let clock = ClockController::start(clock_display, visibility, clock_settings);

        // The failure is already on screen as a notice; the session stays usable.
        if client.list().await.is_err() {
            log::warn!("Initial reminder list could not be loaded");
        }

        Self { client, clock }
    }

    pub fn client(&self) -> &Arc<ReminderClient> {
        &self.client
    }

    pub async fn teardown(self) {
        log::info!("Tearing down reminder session");
        self.clock.stop(CLOCK_STOP_TIMEOUT).await;
    }
}
