use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    api::{ApiError, ClearOutcome, ReminderApi},
    presentation::{ClearAffordance, ListView, NoticeKind, ReminderView},
    reminder::{ContactField, CreatedAt, NewReminder, Reminder},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    List(ListView),
    ClearAffordance(ClearAffordance),
    Notice(NoticeKind, String),
    NoticeDismissed(NoticeKind),
    SubmitPending(bool),
    FormReset,
    ContactField(ContactField),
    ClearConfirmation(bool),
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    fn record(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&ViewEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| predicate(*e)).count()
    }

    pub fn dismissals(&self, kind: NoticeKind) -> usize {
        self.count(|e| *e == ViewEvent::NoticeDismissed(kind))
    }

    pub fn notices(&self, kind: NoticeKind) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Notice(k, text) if *k == kind => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_affordance(&self) -> Option<ClearAffordance> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|e| match e {
                ViewEvent::ClearAffordance(a) => Some(a.clone()),
                _ => None,
            })
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl ReminderView for RecordingView {
    fn render_list(&self, list: &ListView) {
        self.record(ViewEvent::List(list.clone()));
    }

    fn set_clear_affordance(&self, affordance: &ClearAffordance) {
        self.record(ViewEvent::ClearAffordance(affordance.clone()));
    }

    fn show_notice(&self, kind: NoticeKind, text: &str) {
        self.record(ViewEvent::Notice(kind, text.to_owned()));
    }

    fn dismiss_notice(&self, kind: NoticeKind) {
        self.record(ViewEvent::NoticeDismissed(kind));
    }

    fn set_submit_pending(&self, pending: bool) {
        self.record(ViewEvent::SubmitPending(pending));
    }

    fn reset_form(&self) {
        self.record(ViewEvent::FormReset);
    }

    fn show_contact_field(&self, field: ContactField) {
        self.record(ViewEvent::ContactField(field));
    }

    fn set_clear_confirmation(&self, open: bool) {
        self.record(ViewEvent::ClearConfirmation(open));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Server(u16, Option<&'static str>),
    Network,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Create(NewReminder),
    List,
    Clear,
}

/// In-memory stand-in for the reminder service.
pub struct FakeReminderApi {
    pub reminders: Mutex<Vec<Reminder>>,
    create_reply: Mutex<Reply>,
    list_reply: Mutex<Reply>,
    clear_reply: Mutex<Reply>,
    calls: Mutex<Vec<ApiCall>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl Default for FakeReminderApi {
    fn default() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
            create_reply: Mutex::new(Reply::Ok),
            list_reply: Mutex::new(Reply::Ok),
            clear_reply: Mutex::new(Reply::Ok),
            calls: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
        }
    }
}

impl FakeReminderApi {
    pub fn with_reminders(reminders: Vec<Reminder>) -> Self {
        let api = Self::default();
        *api.reminders.lock().unwrap() = reminders;
        api
    }

    pub fn reply_to_create(&self, reply: Reply) {
        *self.create_reply.lock().unwrap() = reply;
    }

    pub fn reply_to_list(&self, reply: Reply) {
        *self.list_reply.lock().unwrap() = reply;
    }

    pub fn reply_to_clear(&self, reply: Reply) {
        *self.clear_reply.lock().unwrap() = reply;
    }

    /// Makes every following request wait until the returned gate is notified.
    pub fn hold_requests(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Lets new requests through. Requests already waiting stay on their gate.
    pub fn stop_holding(&self) {
        *self.gate.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(*c)).count()
    }

    async fn enter(&self, call: ApiCall, reply: &Mutex<Reply>) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let reply = *reply.lock().unwrap();
        match reply {
            Reply::Ok => Ok(()),
            Reply::Server(status, message) => Err(ApiError::Server {
                status,
                message: message.map(str::to_owned),
            }),
            Reply::Network => Err(network_error().await),
        }
    }
}

#[async_trait]
impl ReminderApi for FakeReminderApi {
    async fn create(&self, reminder: &NewReminder) -> Result<(), ApiError> {
        self.enter(ApiCall::Create(reminder.clone()), &self.create_reply)
            .await?;

        let mut reminders = self.reminders.lock().unwrap();
        let id = reminders.len() as i64 + 1;
        reminders.insert(0, stored(id, reminder));
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Reminder>, ApiError> {
        self.enter(ApiCall::List, &self.list_reply).await?;
        Ok(self.reminders.lock().unwrap().clone())
    }

    async fn clear_all(&self) -> Result<ClearOutcome, ApiError> {
        self.enter(ApiCall::Clear, &self.clear_reply).await?;

        let mut reminders = self.reminders.lock().unwrap();
        let cleared_count = reminders.len() as u64;
        reminders.clear();
        Ok(ClearOutcome {
            cleared_count,
            message: Some(format!("Successfully cleared {cleared_count} reminders")),
        })
    }
}

/// A transport failure produced without touching the network.
pub async fn network_error() -> ApiError {
    let error = reqwest::Client::new()
        .get("not a url")
        .send()
        .await
        .expect_err("An invalid URL never produces a response.");
    ApiError::Network(error)
}

pub fn stored(id: i64, reminder: &NewReminder) -> Reminder {
    Reminder {
        id: Some(id),
        date: reminder.date,
        time: reminder.time,
        message: reminder.message.clone(),
        reminder_method: reminder.reminder_method,
        email_address: reminder.email_address.clone(),
        phone_number: reminder.phone_number.clone(),
        is_sent: false,
        created_at: CreatedAt::parse("2025-01-01T08:00:00+05:30").expect("Valid timestamp."),
    }
}
