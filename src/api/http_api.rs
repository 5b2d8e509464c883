use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;

use super::{ApiError, ClearOutcome, ReminderApi};
use crate::reminder::{NewReminder, Reminder};

const CREATE_PATH: &str = "/api/reminder";
const LIST_PATH: &str = "/api/reminders";
const CLEAR_PATH: &str = "/api/reminders/clear";

#[derive(Deserialize)]
struct ListBody {
    reminders: Vec<Reminder>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// `ReminderApi` backed by the reminder service's JSON endpoints.
pub struct HttpReminderApi {
    client: Client,
    base_url: String,
}

impl HttpReminderApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ReminderApi for HttpReminderApi {
    async fn create(&self, reminder: &NewReminder) -> Result<(), ApiError> {
        log::debug!("POST {CREATE_PATH} for reminder on {} {:?}", reminder.date, reminder.time);
        let response = self
            .client
            .post(self.url(CREATE_PATH))
            .json(reminder)
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Reminder>, ApiError> {
        log::debug!("GET {LIST_PATH}");
        let response = self.client.get(self.url(LIST_PATH)).send().await?;
        let body: ListBody = ensure_success(response).await?.json().await?;

        Ok(body.reminders)
    }

    async fn clear_all(&self) -> Result<ClearOutcome, ApiError> {
        log::debug!("DELETE {CLEAR_PATH}");
        let response = self.client.delete(self.url(CLEAR_PATH)).send().await?;

        Ok(ensure_success(response).await?.json().await?)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // An unreadable failure body still counts as a server failure, just without a message.
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .and_then(|body| body.error);

    log::warn!(
        "Reminder service rejected request. [status = {}, message = {:?}]",
        status,
        message
    );

    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}
