pub mod api;
pub mod appsettings;
pub mod client;
pub mod clock;
pub mod form;
pub mod presentation;
pub mod reminder;
pub mod session;

#[cfg(test)]
mod test_utils;

pub use api::{ApiError, HttpReminderApi, ReminderApi};
pub use client::{ClientError, ReminderClient};
pub use session::Session;
