use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicBool, Ordering},
};

use thiserror::Error;

use crate::{
    api::{ApiError, ClearOutcome, ReminderApi},
    presentation::{ClearAffordance, NoticeDelays, NoticeKind, Notifier, ReminderView, render},
    reminder::{NewReminder, Reminder, ReminderMethod},
};

pub const CREATED_MESSAGE: &str = "Your reminder has been scheduled.";
pub const CLEARED_MESSAGE: &str = "All reminders have been cleared.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create reminder";
pub const CLEAR_FAILED_MESSAGE: &str = "Failed to clear reminders";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load reminders";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("The same operation is already in progress")]
    Busy,

    #[error("Clearing reminders requires confirmation")]
    NotConfirmed,
}

/// Keeps a `ReminderView` in step with the remote reminder collection.
///
/// Nothing is cached between calls: every successful mutation is followed by a
/// full `list`, which replaces the rendered collection.
pub struct ReminderClient {
    api: Arc<dyn ReminderApi>,
    view: Arc<dyn ReminderView>,
    notifier: Notifier,
    submitting: AtomicBool,
    clearing: AtomicBool,
    confirmation_open: AtomicBool,
    /// Affordance for the last rendered list. Shown on the trigger whenever no clear is pending.
    clear_affordance: Mutex<ClearAffordance>,
}

impl ReminderClient {
    pub fn new(
        api: Arc<dyn ReminderApi>,
        view: Arc<dyn ReminderView>,
        delays: NoticeDelays,
    ) -> Self {
        let notifier = Notifier::new(Arc::clone(&view), delays);
        Self {
            api,
            view,
            notifier,
            submitting: AtomicBool::new(false),
            clearing: AtomicBool::new(false),
            confirmation_open: AtomicBool::new(false),
            clear_affordance: Mutex::new(ClearAffordance::default()),
        }
    }

    pub async fn create(&self, reminder: &NewReminder) -> Result<(), ClientError> {
        let result = {
            let _pending = SubmitGuard::acquire(self).ok_or(ClientError::Busy)?;
            self.api.create(reminder).await
        };

        match result {
            Ok(()) => {
                log::info!(
                    "Created {:?} reminder for {}",
                    reminder.reminder_method,
                    reminder.date
                );
                self.notifier.show(NoticeKind::Created, CREATED_MESSAGE);
                self.view.reset_form();
                self.select_method(ReminderMethod::default());
                // A failed refresh is already surfaced by `list`.
                let _ = self.list().await;
                Ok(())
            }
            Err(error) => {
                log::warn!("Could not create reminder. [error = {error}]");
                self.notifier
                    .show(NoticeKind::Error, failure_text(&error, CREATE_FAILED_MESSAGE));
                Err(error.into())
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<Reminder>, ClientError> {
        match self.api.list().await {
            Ok(reminders) => {
                log::debug!("Rendering {} reminders", reminders.len());
                self.view.render_list(&render::list_view(&reminders));
                self.set_clear_affordance(ClearAffordance::for_count(reminders.len()));
                Ok(reminders)
            }
            Err(error) => {
                log::warn!("Could not load reminders. [error = {error}]");
                self.notifier.show(NoticeKind::Error, LOAD_FAILED_MESSAGE);
                Err(error.into())
            }
        }
    }

    /// Opens the clear confirmation. Returns false while the trigger is disabled.
    pub fn request_clear(&self) -> bool {
        if !self.clear_affordance().enabled {
            return false;
        }

        self.confirmation_open.store(true, Ordering::SeqCst);
        self.view.set_clear_confirmation(true);
        true
    }

    /// Closes the clear confirmation without touching the collection.
    pub fn dismiss_clear(&self) {
        if self.confirmation_open.swap(false, Ordering::SeqCst) {
            self.view.set_clear_confirmation(false);
        }
    }

    pub async fn confirm_clear(&self) -> Result<ClearOutcome, ClientError> {
        if !self.confirmation_open.load(Ordering::SeqCst) {
            return Err(ClientError::NotConfirmed);
        }

        let result = {
            let _pending = ClearGuard::acquire(self).ok_or(ClientError::Busy)?;
            self.api.clear_all().await
        };
        self.dismiss_clear();

        match result {
            Ok(outcome) => {
                log::info!("Cleared {} reminders", outcome.cleared_count);
                let text = outcome.message.as_deref().unwrap_or(CLEARED_MESSAGE);
                self.notifier.show(NoticeKind::Cleared, text);
                let _ = self.list().await;
                Ok(outcome)
            }
            Err(error) => {
                log::warn!("Could not clear reminders. [error = {error}]");
                self.notifier
                    .show(NoticeKind::Error, failure_text(&error, CLEAR_FAILED_MESSAGE));
                Err(error.into())
            }
        }
    }

    pub fn select_method(&self, method: ReminderMethod) {
        self.view.show_contact_field(method.contact_field());
    }

    pub fn dismiss_notice(&self, kind: NoticeKind) {
        self.notifier.dismiss(kind);
    }

    pub fn clear_affordance(&self) -> ClearAffordance {
        if self.clearing.load(Ordering::SeqCst) {
            return ClearAffordance::clearing();
        }
        self.settled_affordance().clone()
    }

    /// Records the affordance for the latest list. The trigger keeps showing
    /// "Clearing..." until a pending clear finishes.
    fn set_clear_affordance(&self, affordance: ClearAffordance) {
        let mut settled = self.settled_affordance();
        if !self.clearing.load(Ordering::SeqCst) {
            self.view.set_clear_affordance(&affordance);
        }
        *settled = affordance;
    }

    fn settled_affordance(&self) -> MutexGuard<'_, ClearAffordance> {
        self.clear_affordance
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

fn failure_text<'a>(error: &'a ApiError, fallback: &'a str) -> &'a str {
    match error {
        ApiError::Network(_) => NETWORK_ERROR_MESSAGE,
        ApiError::Server { .. } => error.server_message().unwrap_or(fallback),
    }
}

/// Holds the submit affordance pending until dropped.
struct SubmitGuard<'a> {
    client: &'a ReminderClient,
}

impl<'a> SubmitGuard<'a> {
    fn acquire(client: &'a ReminderClient) -> Option<Self> {
        client
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        client.view.set_submit_pending(true);
        Some(Self { client })
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.client.view.set_submit_pending(false);
        self.client.submitting.store(false, Ordering::SeqCst);
    }
}

/// Shows "Clearing..." on the clear trigger until dropped, then shows the
/// affordance of the most recently rendered list.
struct ClearGuard<'a> {
    client: &'a ReminderClient,
}

impl<'a> ClearGuard<'a> {
    fn acquire(client: &'a ReminderClient) -> Option<Self> {
        let _settled = client.settled_affordance();
        client
            .clearing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        client.view.set_clear_affordance(&ClearAffordance::clearing());
        Some(Self { client })
    }
}

impl Drop for ClearGuard<'_> {
    fn drop(&mut self) {
        let settled = self.client.settled_affordance();
        self.client.clearing.store(false, Ordering::SeqCst);
        self.client.view.set_clear_affordance(&settled);
    }
}
