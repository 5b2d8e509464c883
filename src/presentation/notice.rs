use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::task;

use super::{NoticeKind, ReminderView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeDelays {
    pub success: Duration,
    pub error: Duration,
}

impl NoticeDelays {
    pub fn for_kind(&self, kind: NoticeKind) -> Duration {
        match kind {
            NoticeKind::Created | NoticeKind::Cleared => self.success,
            NoticeKind::Error => self.error,
        }
    }
}

impl Default for NoticeDelays {
    fn default() -> Self {
        Self {
            success: Duration::from_secs(3),
            error: Duration::from_secs(5),
        }
    }
}

type Generations = Arc<Mutex<HashMap<NoticeKind, u64>>>;

/// Shows transient notices and dismisses each one after its kind's delay.
///
/// A notice replaced by a newer one of the same kind outlives the older timer.
#[derive(Clone)]
pub struct Notifier {
    view: Arc<dyn ReminderView>,
    delays: NoticeDelays,
    generations: Generations,
}

impl Notifier {
    pub fn new(view: Arc<dyn ReminderView>, delays: NoticeDelays) -> Self {
        Self {
            view,
            delays,
            generations: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn show(&self, kind: NoticeKind, text: &str) {
        let generation = bump(&self.generations, kind);
        self.view.show_notice(kind, text);

        let delay = self.delays.for_kind(kind);
        let view = Arc::clone(&self.view);
        let generations = Arc::clone(&self.generations);
        task::spawn(async move {
            tokio::time::sleep(delay).await;
            if current(&generations, kind) == generation {
                view.dismiss_notice(kind);
            }
        });
    }

    pub fn dismiss(&self, kind: NoticeKind) {
        bump(&self.generations, kind);
        self.view.dismiss_notice(kind);
    }
}

fn bump(generations: &Generations, kind: NoticeKind) -> u64 {
    let mut generations = generations.lock().unwrap_or_else(|e| e.into_inner());
    let generation = generations.entry(kind).or_default();
    *generation += 1;
    *generation
}

fn current(generations: &Generations, kind: NoticeKind) -> u64 {
    let generations = generations.lock().unwrap_or_else(|e| e.into_inner());
    generations.get(&kind).copied().unwrap_or_default()
}
