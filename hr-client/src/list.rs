//! Paginated list controller
//!
//! One controller per dashboard list. It owns the page number, the committed
//! search term and the loaded page, keeps `(page, search)` mirrored into the
//! URL, and fetches whenever either changes.
//!
//! Every `load` takes a generation number. Only the response to the most
//! recently started load is applied; older responses are dropped. After
//! [`ListController::unmount`] nothing is applied at all.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use shared::{PageQuery, PageResult, Pagination, RecordId, total_pages};
use tokio::task::JoinHandle;

use crate::api::{Resource, ResourceApi};
use crate::config::{ClientConfig, SearchMode};
use crate::location::{self, ListLocation};
use crate::navigator::Navigator;
use crate::notify::Notifier;
use crate::optimistic::{InFlightSet, OptimisticUpdater};
use crate::session::SessionStore;
use crate::{ClientError, ClientResult};

/// Where a guarded page stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePhase {
    Unauthenticated,
    Loading,
    Loaded,
}

/// What a load attempt did to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched page is now shown
    Applied,
    /// A newer load started meanwhile; this response was dropped
    Stale,
    /// Nothing was fetched or applied (unmounted, page out of range, ...)
    Skipped,
    /// Credential missing or rejected; sent to the login route
    Redirected,
}

/// Collaborators shared by every list of a dashboard.
#[derive(Clone)]
pub struct ListContext {
    pub session: SessionStore,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Notifier,
    pub page_size: u32,
    pub search_mode: SearchMode,
    pub login_route: String,
}

impl ListContext {
    pub fn new(
        config: &ClientConfig,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
        notifier: Notifier,
    ) -> Self {
        Self {
            session,
            navigator,
            notifier,
            page_size: config.page_size.max(1),
            search_mode: config.search_mode,
            login_route: config.login_route.clone(),
        }
    }
}

struct ListState<R> {
    page: u32,
    search: String,
    /// Search box contents, committed or not
    draft: String,
    result: PageResult<R>,
    phase: PagePhase,
    loading: bool,
    last_error: Option<String>,
}

impl<R> Default for ListState<R> {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            draft: String::new(),
            result: PageResult::empty(),
            phase: PagePhase::Unauthenticated,
            loading: false,
            last_error: None,
        }
    }
}

struct Inner<R: Resource> {
    api: Arc<dyn ResourceApi<R>>,
    ctx: ListContext,
    state: Mutex<ListState<R>>,
    generation: AtomicU64,
    mounted: AtomicBool,
    in_flight: InFlightSet,
    debounce: Mutex<Option<JoinHandle<()>>>,
}

/// Shared handle to one list's state.
pub struct ListController<R: Resource> {
    inner: Arc<Inner<R>>,
}

impl<R: Resource> Clone for ListController<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R: Resource> std::fmt::Debug for ListController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("ListController")
            .field("resource", &R::SPEC.name)
            .field("page", &state.page)
            .field("search", &state.search)
            .field("phase", &state.phase)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ListController<R> {
    pub fn new(api: Arc<dyn ResourceApi<R>>, ctx: ListContext) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                ctx,
                state: Mutex::new(ListState::default()),
                generation: AtomicU64::new(0),
                mounted: AtomicBool::new(false),
                in_flight: InFlightSet::default(),
                debounce: Mutex::new(None),
            }),
        }
    }

    /// Enter the page.
    ///
    /// Without a stored credential the controller stays `Unauthenticated` and
    /// the navigator is sent to the login route. Otherwise `(page, search)`
    /// is restored from the current URL and the first page is loaded.
    pub async fn mount(&self) -> ClientResult<LoadOutcome> {
        self.inner.mounted.store(true, Ordering::SeqCst);

        if !self.inner.ctx.session.is_authenticated() {
            self.inner.state.lock().phase = PagePhase::Unauthenticated;
            tracing::info!(resource = R::SPEC.name, "No credential, redirecting to login");
            self.inner.ctx.navigator.navigate(&self.inner.ctx.login_route);
            return Ok(LoadOutcome::Redirected);
        }

        let current = self.inner.ctx.navigator.current();
        let restored = if location::route_of(&current) == R::SPEC.route {
            location::decode(&current)
        } else {
            ListLocation::default()
        };
        {
            let mut state = self.inner.state.lock();
            state.page = restored.page;
            state.draft = restored.search.clone();
            state.search = restored.search;
        }
        self.sync_location();
        self.load().await
    }

    /// Leave the page. Requests still running finish but are not applied.
    pub fn unmount(&self) {
        self.inner.mounted.store(false, Ordering::SeqCst);
        if let Some(pending) = self.inner.debounce.lock().take() {
            pending.abort();
        }
        self.inner.state.lock().loading = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::SeqCst)
    }

    /// Fetch the page for the current `(page, search)`.
    ///
    /// On a non-auth failure the previously loaded page stays visible and an
    /// empty-state notification is raised.
    pub async fn load(&self) -> ClientResult<LoadOutcome> {
        if !self.is_mounted() {
            return Ok(LoadOutcome::Skipped);
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = {
            let mut state = self.inner.state.lock();
            state.loading = true;
            state.phase = PagePhase::Loading;
            PageQuery::new(state.page, self.inner.ctx.page_size).with_search(state.search.clone())
        };

        let result = self.inner.api.fetch_page(&query).await;

        if !self.is_mounted() {
            tracing::debug!(resource = R::SPEC.name, "Response after unmount dropped");
            return Ok(LoadOutcome::Skipped);
        }
        if self.inner.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(resource = R::SPEC.name, generation, "Stale response dropped");
            return Ok(LoadOutcome::Stale);
        }

        let mut state = self.inner.state.lock();
        state.loading = false;
        match result {
            Ok(page) => {
                state.result = page;
                state.phase = PagePhase::Loaded;
                state.last_error = None;
                Ok(LoadOutcome::Applied)
            }
            Err(e) if e.is_unauthorized() => {
                state.phase = PagePhase::Unauthenticated;
                Ok(LoadOutcome::Redirected)
            }
            Err(e) => {
                state.phase = PagePhase::Loaded;
                state.last_error = Some(e.to_string());
                let message = empty_message(R::SPEC.name, &state.search);
                drop(state);

                tracing::warn!(resource = R::SPEC.name, error = %e, "List load failed");
                self.inner.ctx.notifier.error(message);
                Err(ClientError::fetch(R::SPEC.name, e))
            }
        }
    }

    /// Jump to `page`. Pages outside `1..=total_pages` are ignored.
    pub async fn go_to_page(&self, page: u32) -> ClientResult<LoadOutcome> {
        {
            let mut state = self.inner.state.lock();
            let total = total_pages(state.result.total_count, self.inner.ctx.page_size);
            if page < 1 || page > total {
                return Ok(LoadOutcome::Skipped);
            }
            state.page = page;
        }
        self.sync_location();
        self.load().await
    }

    pub async fn next_page(&self) -> ClientResult<LoadOutcome> {
        let page = self.page();
        self.go_to_page(page.saturating_add(1)).await
    }

    pub async fn prev_page(&self) -> ClientResult<LoadOutcome> {
        let page = self.page();
        self.go_to_page(page.saturating_sub(1)).await
    }

    /// Commit `term`, back to page 1.
    pub async fn search(&self, term: impl Into<String>) -> ClientResult<LoadOutcome> {
        let term = term.into();
        {
            let mut state = self.inner.state.lock();
            state.page = 1;
            state.draft = term.clone();
            state.search = term;
        }
        self.sync_location();
        self.load().await
    }

    /// Re-fetch the current query.
    pub async fn refresh(&self) -> ClientResult<LoadOutcome> {
        self.load().await
    }

    fn sync_location(&self) {
        if !self.is_mounted() {
            return;
        }
        let url = {
            let state = self.inner.state.lock();
            location::encode(R::SPEC.route, state.page, &state.search)
        };
        self.inner.ctx.navigator.replace(&url);
    }

    pub fn page(&self) -> u32 {
        self.inner.state.lock().page
    }

    /// Committed search term.
    pub fn search_term(&self) -> String {
        self.inner.state.lock().search.clone()
    }

    pub fn page_size(&self) -> u32 {
        self.inner.ctx.page_size
    }

    pub fn records(&self) -> Vec<R> {
        self.inner.state.lock().result.records.clone()
    }

    pub fn total_count(&self) -> u64 {
        self.inner.state.lock().result.total_count
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count(), self.inner.ctx.page_size)
    }

    pub fn pagination(&self) -> Pagination {
        let state = self.inner.state.lock();
        Pagination::new(state.page, self.inner.ctx.page_size, state.result.total_count)
    }

    /// Pagination controls are only rendered for more than one page.
    pub fn shows_pagination(&self) -> bool {
        self.pagination().is_visible()
    }

    pub fn page_numbers(&self) -> Vec<u32> {
        (1..=self.total_pages()).collect()
    }

    /// Loaded records narrowed by the search box contents.
    ///
    /// Display only; the server-side search is what pages are fetched by.
    pub fn filtered_records(&self) -> Vec<R> {
        let state = self.inner.state.lock();
        shared::filter_records(&state.result.records, &state.draft)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn phase(&self) -> PagePhase {
        self.inner.state.lock().phase
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.lock().loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.state.lock().last_error.clone()
    }

    pub fn empty_message(&self) -> String {
        empty_message(R::SPEC.name, &self.inner.state.lock().search)
    }

    pub fn is_in_flight(&self, id: &RecordId) -> bool {
        self.inner.in_flight.contains(id)
    }

    /// Field updater writing into this list's records.
    pub fn updater(&self) -> OptimisticUpdater<R> {
        OptimisticUpdater::new(self.clone())
    }

    /// Apply `f` to the loaded record `id`, if the list is live and has it.
    pub(crate) fn update_record<T>(&self, id: &RecordId, f: impl FnOnce(&mut R) -> T) -> Option<T> {
        if !self.is_mounted() {
            return None;
        }
        let mut state = self.inner.state.lock();
        state
            .result
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .map(f)
    }

    pub(crate) fn api(&self) -> &Arc<dyn ResourceApi<R>> {
        &self.inner.api
    }

    pub(crate) fn notifier(&self) -> &Notifier {
        &self.inner.ctx.notifier
    }

    pub(crate) fn in_flight(&self) -> &InFlightSet {
        &self.inner.in_flight
    }

    pub(crate) fn search_mode(&self) -> SearchMode {
        self.inner.ctx.search_mode
    }

    pub(crate) fn set_draft(&self, term: &str) {
        self.inner.state.lock().draft = term.to_string();
    }

    pub(crate) fn draft_term(&self) -> String {
        self.inner.state.lock().draft.clone()
    }

    /// Replace the pending debounce timer, cancelling the previous one.
    pub(crate) fn replace_debounce(&self, handle: JoinHandle<()>) {
        if let Some(previous) = self.inner.debounce.lock().replace(handle) {
            previous.abort();
        }
    }
}

fn empty_message(resource: &str, search: &str) -> String {
    if search.is_empty() {
        format!("No {resource} records found")
    } else {
        format!("No {resource} records found for {search}")
    }
}
