use chrono::NaiveDate;
use thiserror::Error;

use crate::reminder::{ContactField, NewReminder, ReminderMethod, ReminderTime};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Date must be in YYYY-MM-DD format: {0}")]
    InvalidDate(String),

    #[error("Date {date} is before the earliest allowed date {min}")]
    DateInPast { date: NaiveDate, min: NaiveDate },

    #[error("Time must be in HH:MM format: {0}")]
    InvalidTime(String),

    #[error("Message is required")]
    MissingMessage,

    #[error("Email address required for email reminders")]
    MissingEmail,

    #[error("Phone number required for SMS reminders")]
    MissingPhone,
}

/// Raw values as typed into the reminder form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderForm {
    pub date: String,
    pub time: String,
    pub message: String,
    pub reminder_method: ReminderMethod,
    pub email_address: String,
    pub phone_number: String,
}

impl ReminderForm {
    /// Field the current method makes visible and required.
    pub fn required_contact(&self) -> ContactField {
        self.reminder_method.contact_field()
    }

    /// Enforces the form's required fields and builds the create request.
    /// `today` is the earliest date the picker offers.
    pub fn into_new_reminder(self, today: NaiveDate) -> Result<NewReminder, FormError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(self.date.clone()))?;
        if date < today {
            return Err(FormError::DateInPast { date, min: today });
        }

        let time =
            ReminderTime::parse(&self.time).map_err(|_| FormError::InvalidTime(self.time.clone()))?;

        let message = self.message.trim();
        if message.is_empty() {
            return Err(FormError::MissingMessage);
        }

        let (email_address, phone_number) = match self.required_contact() {
            ContactField::Email => (
                Some(non_blank(&self.email_address).ok_or(FormError::MissingEmail)?),
                None,
            ),
            ContactField::Phone => (
                None,
                Some(non_blank(&self.phone_number).ok_or(FormError::MissingPhone)?),
            ),
        };

        Ok(NewReminder {
            date,
            time,
            message: message.to_owned(),
            reminder_method: self.reminder_method,
            email_address,
            phone_number,
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}
