use std::sync::{Arc, Mutex};

use chrono::Utc;
use chrono_tz::Tz;
use reminder_desk::{
    ReminderClient,
    clock::{ClockDisplay, ClockReading, Visibility},
    form::ReminderForm,
    presentation::{ClearAffordance, ListView, NoticeKind, ReminderView},
    reminder::{ContactField, ReminderMethod},
};
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    sync::watch,
};

const HELP: &str = "\
Commands:
  list                                         reload reminders
  new <YYYY-MM-DD> <HH:MM> email|sms <contact> <message...>
  method email|sms                             switch the contact field
  clear                                        ask to clear all reminders
  yes | no                                     confirm or cancel clearing
  time                                         show the clock
  hide | show                                  pause or resume the clock
  quit";

/// Presentation port that writes to the terminal.
#[derive(Default)]
pub struct ConsoleView {
    last_reading: Mutex<Option<ClockReading>>,
}

impl ConsoleView {
    fn print_clock(&self) {
        match self.last_reading.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            Some(reading) => println!(
                "{}  ({})  {}",
                reading.hero_time, reading.date, reading.timezone
            ),
            None => println!("Clock is not running."),
        }
    }
}

impl ReminderView for ConsoleView {
    fn render_list(&self, list: &ListView) {
        match list {
            ListView::Empty { message } => println!("{message}"),
            ListView::Cards(cards) => {
                for card in cards {
                    println!(
                        "[{} {}] {} | {} -> {} | {} | created {}",
                        card.date,
                        card.time,
                        card.message,
                        card.method,
                        card.contact,
                        card.status.label(),
                        card.created
                    );
                }
            }
        }
    }

    fn set_clear_affordance(&self, affordance: &ClearAffordance) {
        let state = if affordance.enabled { "" } else { " (disabled)" };
        println!("[{}]{state}", affordance.label);
    }

    fn show_notice(&self, kind: NoticeKind, text: &str) {
        match kind {
            NoticeKind::Error => eprintln!("error: {text}"),
            NoticeKind::Created | NoticeKind::Cleared => println!("ok: {text}"),
        }
    }

    fn dismiss_notice(&self, kind: NoticeKind) {
        log::trace!("Notice {kind:?} dismissed");
    }

    fn set_submit_pending(&self, pending: bool) {
        if pending {
            println!("Scheduling reminder...");
        }
    }

    fn reset_form(&self) {
        log::debug!("Form reset");
    }

    fn show_contact_field(&self, field: ContactField) {
        match field {
            ContactField::Email => println!("Contact: email address"),
            ContactField::Phone => println!("Contact: phone number"),
        }
    }

    fn set_clear_confirmation(&self, open: bool) {
        if open {
            println!("Clear all reminders? This cannot be undone. [yes/no]");
        }
    }
}

impl ClockDisplay for ConsoleView {
    fn show_clock(&self, reading: &ClockReading) {
        *self.last_reading.lock().unwrap_or_else(|e| e.into_inner()) = Some(reading.clone());
    }
}

pub async fn run(
    client: &Arc<ReminderClient>,
    view: &ConsoleView,
    visibility: &watch::Sender<Visibility>,
    timezone: Tz,
) -> io::Result<()> {
    println!("{HELP}");
    let mut lines = BufReader::new(io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("list") => spawn_op(client, |c| async move {
                let _ = c.list().await;
            }),
            Some("new") => {
                let words: Vec<&str> = words.collect();
                let Some(form) = parse_form(&words) else {
                    println!("usage: new <YYYY-MM-DD> <HH:MM> email|sms <contact> <message...>");
                    continue;
                };
                let today = Utc::now().with_timezone(&timezone).date_naive();
                match form.into_new_reminder(today) {
                    Ok(reminder) => spawn_op(client, |c| async move {
                        let _ = c.create(&reminder).await;
                    }),
                    Err(error) => eprintln!("error: {error}"),
                }
            }
            Some("method") => match words.next().and_then(parse_method) {
                Some(method) => client.select_method(method),
                None => println!("usage: method email|sms"),
            },
            Some("clear") => {
                if !client.request_clear() {
                    println!("Nothing to clear.");
                }
            }
            Some("yes") => spawn_op(client, |c| async move {
                if let Err(error) = c.confirm_clear().await {
                    log::debug!("Clear did not complete: {error}");
                }
            }),
            Some("no") => client.dismiss_clear(),
            Some("time") => view.print_clock(),
            Some("hide") => {
                let _ = visibility.send(Visibility::Hidden);
            }
            Some("show") => {
                let _ = visibility.send(Visibility::Visible);
            }
            Some("quit") | Some("exit") => break,
            Some(_) => println!("{HELP}"),
            None => {}
        }
    }

    Ok(())
}

fn spawn_op<F, Fut>(client: &Arc<ReminderClient>, op: F)
where
    F: FnOnce(Arc<ReminderClient>) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(op(Arc::clone(client)));
}

fn parse_method(word: &str) -> Option<ReminderMethod> {
    match word.to_ascii_lowercase().as_str() {
        "email" => Some(ReminderMethod::Email),
        "sms" => Some(ReminderMethod::Sms),
        _ => None,
    }
}

fn parse_form(words: &[&str]) -> Option<ReminderForm> {
    let [date, time, method, contact, message @ ..] = words else {
        return None;
    };
    let reminder_method = parse_method(method)?;
    let (email_address, phone_number) = match reminder_method.contact_field() {
        ContactField::Email => (contact.to_string(), String::new()),
        ContactField::Phone => (String::new(), contact.to_string()),
    };

    Some(ReminderForm {
        date: date.to_string(),
        time: time.to_string(),
        message: message.join(" "),
        reminder_method,
        email_address,
        phone_number,
    })
}
