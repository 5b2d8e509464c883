use crate::reminder::{ContactField, Reminder};

use super::{EMPTY_LIST_MESSAGE, ListView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    Pending,
}

impl DeliveryStatus {
    pub fn label(self) -> &'static str {
        match self {
            DeliveryStatus::Sent => "Sent",
            DeliveryStatus::Pending => "Pending",
        }
    }
}

/// Display-ready fields of a single reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderCard {
    pub date: String,
    pub time: String,
    pub method: &'static str,
    pub contact_field: ContactField,
    pub status: DeliveryStatus,
    pub message: String,
    pub contact: String,
    pub created: String,
}

impl ReminderCard {
    pub fn from_reminder(reminder: &Reminder) -> Self {
        let status = if reminder.is_sent {
            DeliveryStatus::Sent
        } else {
            DeliveryStatus::Pending
        };

        Self {
            date: reminder.date.format("%a, %b %-d, %Y").to_string(),
            time: reminder.time.time().format("%-I:%M %p").to_string(),
            method: reminder.reminder_method.label(),
            contact_field: reminder.reminder_method.contact_field(),
            status,
            message: reminder.message.clone(),
            contact: reminder.contact().unwrap_or_default().to_owned(),
            created: reminder
                .created_at
                .timestamp()
                .format("%b %-d, %-I:%M %p")
                .to_string(),
        }
    }
}

/// Full replacement view for a fetched collection.
pub fn list_view(reminders: &[Reminder]) -> ListView {
    if reminders.is_empty() {
        return ListView::Empty {
            message: EMPTY_LIST_MESSAGE,
        };
    }

    ListView::Cards(reminders.iter().map(ReminderCard::from_reminder).collect())
}
