//! Navigation seam
//!
//! Stands in for the browser history/location object. The HTTP client uses it
//! to force the login view; list controllers use it to keep `(page, search)`
//! in the shareable URL.

use parking_lot::Mutex;

pub trait Navigator: Send + Sync {
    /// Replace the current history entry (no new entry is pushed).
    fn replace(&self, url: &str);

    /// Push a new location.
    fn navigate(&self, route: &str);

    /// Current location, path plus query string.
    fn current(&self) -> String;
}

#[derive(Debug, Default)]
struct History {
    current: String,
    pushed: Vec<String>,
    replacements: usize,
}

/// In-process navigator that records every transition.
#[derive(Debug, Default)]
pub struct MemoryNavigator {
    history: Mutex<History>,
}

impl MemoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: Mutex::new(History {
                current: initial.into(),
                ..Default::default()
            }),
        }
    }

    /// Locations pushed with [`Navigator::navigate`], oldest first.
    pub fn navigations(&self) -> Vec<String> {
        self.history.lock().pushed.clone()
    }

    pub fn replacements(&self) -> usize {
        self.history.lock().replacements
    }
}

impl Navigator for MemoryNavigator {
    fn replace(&self, url: &str) {
        let mut history = self.history.lock();
        history.current = url.to_string();
        history.replacements += 1;
    }

    fn navigate(&self, route: &str) {
        tracing::debug!(route, "Navigating");
        let mut history = self.history.lock();
        history.current = route.to_string();
        history.pushed.push(route.to_string());
    }

    fn current(&self) -> String {
        self.history.lock().current.clone()
    }
}
