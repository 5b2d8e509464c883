pub mod notice;
pub mod render;

pub use notice::{NoticeDelays, Notifier};
pub use render::ReminderCard;

use crate::reminder::ContactField;

pub const EMPTY_LIST_MESSAGE: &str = "No reminders yet. Create your first reminder above!";
pub const NOTHING_TO_CLEAR_LABEL: &str = "No Reminders to Clear";
pub const CLEAR_ALL_LABEL: &str = "Clear All Reminders";
pub const CLEARING_LABEL: &str = "Clearing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// A reminder was created.
    Created,
    /// All reminders were cleared.
    Cleared,
    Error,
}

/// Enabled state and label of the bulk clear trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearAffordance {
    pub enabled: bool,
    pub label: String,
}

impl ClearAffordance {
    pub fn for_count(count: usize) -> Self {
        if count == 0 {
            Self {
                enabled: false,
                label: NOTHING_TO_CLEAR_LABEL.to_owned(),
            }
        } else {
            Self {
                enabled: true,
                label: format!("{CLEAR_ALL_LABEL} ({count})"),
            }
        }
    }

    pub fn clearing() -> Self {
        Self {
            enabled: false,
            label: CLEARING_LABEL.to_owned(),
        }
    }
}

impl Default for ClearAffordance {
    fn default() -> Self {
        Self {
            enabled: true,
            label: CLEAR_ALL_LABEL.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty { message: &'static str },
    Cards(Vec<ReminderCard>),
}

/// Presentation port driven by `ReminderClient`.
///
/// Every call replaces the previous state of the element it addresses.
pub trait ReminderView: Send + Sync {
    fn render_list(&self, list: &ListView);
    fn set_clear_affordance(&self, affordance: &ClearAffordance);
    fn show_notice(&self, kind: NoticeKind, text: &str);
    fn dismiss_notice(&self, kind: NoticeKind);
    fn set_submit_pending(&self, pending: bool);
    fn reset_form(&self);
    fn show_contact_field(&self, field: ContactField);
    fn set_clear_confirmation(&self, open: bool);
}
