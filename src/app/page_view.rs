use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use uuid::Uuid;

use crate::{notify::Notifier, submission::Submitter};

/// The form state of every page that has submitted, keyed by the id rendered
/// into the page.
///
/// A page load only mints an id; the form is stored on its first submission.
/// Views not seen for `ttl` are dropped, at most once every `ttl / 2`, unless a
/// delivery is still outstanding.
#[derive(Clone, Debug)]
pub struct PageViews {
    views: Arc<Mutex<Views>>,
    notifier: Arc<dyn Notifier>,
    ttl: Duration,
}

#[derive(Debug)]
struct Views {
    entries: HashMap<Uuid, PageView>,
    pruned_at: Instant,
}

#[derive(Debug)]
struct PageView {
    last_seen: Instant,
    submitter: Arc<Submitter>,
}

impl PageViews {
    pub fn new(notifier: Arc<dyn Notifier>, ttl: Duration) -> Self {
        Self {
            views: Arc::new(Mutex::new(Views {
                entries: HashMap::new(),
                pruned_at: Instant::now(),
            })),
            notifier,
            ttl,
        }
    }

    /// Id for a freshly rendered, idle form. Nothing is stored until the form
    /// is submitted.
    pub fn open(&self) -> Uuid {
        Uuid::new_v4()
    }

    /// An unknown or expired id starts over with an idle form.
    pub fn get_or_open(&self, id: Uuid) -> Arc<Submitter> {
        let mut views = self.lock();
        if views.pruned_at.elapsed() >= self.ttl / 2 {
            let ttl = self.ttl;
            views
                .entries
                .retain(|_, view| view.last_seen.elapsed() < ttl || view.submitter.is_sending());
            views.pruned_at = Instant::now();
        }

        let view = views.entries.entry(id).or_insert_with(|| PageView {
            last_seen: Instant::now(),
            submitter: Arc::new(Submitter::new(self.notifier.clone())),
        });
        view.last_seen = Instant::now();
        view.submitter.clone()
    }

    #[cfg(test)]
    fn get(&self, id: Uuid) -> Option<Arc<Submitter>> {
        self.lock().entries.get(&id).map(|view| view.submitter.clone())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lock().entries.len()
    }

    fn lock(&self) -> MutexGuard<'_, Views> {
        self.views.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
