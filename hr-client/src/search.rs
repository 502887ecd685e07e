//! Search box handling
//!
//! A list either commits its search term on explicit submit or once typing
//! pauses, depending on its [`SearchMode`]. The search box contents always
//! drive the display filter.

use crate::api::Resource;
use crate::config::SearchMode;
use crate::list::{ListController, LoadOutcome};
use crate::ClientResult;

impl<R: Resource> ListController<R> {
    /// The search box changed.
    ///
    /// In debounced mode this (re)starts the commit timer; the term is
    /// committed when no further input arrives within the delay.
    ///
    /// Ignored once the list is unmounted.
    pub fn input(&self, term: impl Into<String>) {
        if !self.is_mounted() {
            return;
        }
        let term = term.into();
        self.set_draft(&term);

        let SearchMode::Debounced(delay) = self.search_mode() else {
            return;
        };
        let list = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !list.is_mounted() {
                return;
            }
            // Only the timer is cancellable; a started fetch runs to completion
            tokio::spawn(async move {
                if let Err(e) = list.search(term).await {
                    tracing::debug!(error = %e, "Debounced search failed");
                }
            });
        });
        self.replace_debounce(handle);
    }

    /// Search button or Enter. Commits the search box contents.
    ///
    /// Ignored by debounced lists, which commit on their own.
    pub async fn submit_search(&self) -> ClientResult<LoadOutcome> {
        match self.search_mode() {
            SearchMode::Submit => {
                let term = self.draft_term();
                self.search(term).await
            }
            SearchMode::Debounced(_) => Ok(LoadOutcome::Skipped),
        }
    }

    /// Current search box contents.
    pub fn draft(&self) -> String {
        self.draft_term()
    }
}
