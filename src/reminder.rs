use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

pub type ReminderId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderMethod {
    #[default]
    Email,
    Sms,
}

/// Contact field that a reminder method makes visible and mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Email,
    Phone,
}

impl ReminderMethod {
    pub fn contact_field(self) -> ContactField {
        match self {
            ReminderMethod::Email => ContactField::Email,
            ReminderMethod::Sms => ContactField::Phone,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReminderMethod::Email => "EMAIL",
            ReminderMethod::Sms => "SMS",
        }
    }
}

/// Wall-clock firing time, normalized to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime(NaiveTime);

impl ReminderTime {
    pub fn new(inner: NaiveTime) -> Self {
        let normalized_time = inner
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .expect("Zero is always a valid second and nanosecond.");
        Self(normalized_time)
    }

    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        let value = value.trim();
        NaiveTime::parse_from_str(value, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
            .map(Self::new)
    }

    pub fn time(&self) -> &NaiveTime {
        &self.0
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = chrono::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReminderTime> for String {
    fn from(value: ReminderTime) -> Self {
        value.0.format("%H:%M").to_string()
    }
}

/// Server-assigned creation timestamp.
///
/// The server emits RFC 3339 when it knows the offset and a bare ISO timestamp
/// otherwise. Bare timestamps are read at offset zero so that they display as
/// the wall time the server reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CreatedAt(DateTime<FixedOffset>);

impl CreatedAt {
    pub fn new(inner: DateTime<FixedOffset>) -> Self {
        Self(inner)
    }

    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value).map(Self).or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| Self(naive.and_utc().fixed_offset()))
        })
    }

    pub fn timestamp(&self) -> &DateTime<FixedOffset> {
        &self.0
    }
}

impl TryFrom<String> for CreatedAt {
    type Error = chrono::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CreatedAt> for String {
    fn from(value: CreatedAt) -> Self {
        value.0.to_rfc3339()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(default)]
    pub id: Option<ReminderId>,
    pub date: NaiveDate,
    pub time: ReminderTime,
    pub message: String,
    #[serde(default)]
    pub reminder_method: ReminderMethod,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub is_sent: bool,
    pub created_at: CreatedAt,
}

impl Reminder {
    /// Contact that the reminder will be delivered to, chosen by its method.
    pub fn contact(&self) -> Option<&str> {
        match self.reminder_method.contact_field() {
            ContactField::Email => self.email_address.as_deref(),
            ContactField::Phone => self.phone_number.as_deref(),
        }
    }
}

/// Body of a create request. Only the contact field matching the method is sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReminder {
    pub date: NaiveDate,
    pub time: ReminderTime,
    pub message: String,
    pub reminder_method: ReminderMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl NewReminder {
    pub fn email(date: NaiveDate, time: ReminderTime, message: &str, address: &str) -> Self {
        Self {
            date,
            time,
            message: message.to_owned(),
            reminder_method: ReminderMethod::Email,
            email_address: Some(address.to_owned()),
            phone_number: None,
        }
    }

    pub fn sms(date: NaiveDate, time: ReminderTime, message: &str, phone: &str) -> Self {
        Self {
            date,
            time,
            message: message.to_owned(),
            reminder_method: ReminderMethod::Sms,
            email_address: None,
            phone_number: Some(phone.to_owned()),
        }
    }
}
