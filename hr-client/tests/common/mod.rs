// hr-client/tests/common/mod.rs
// Shared fixtures: scripted resource API, employees, wiring

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hr_client::models::Employee;
use hr_client::{
    ClientResult, FieldRequest, ListContext, ListController, MemoryNavigator, Notifier, PageQuery,
    PageResult, Resource, ResourceApi, SearchMode, SessionStore,
};
use parking_lot::Mutex;
use serde_json::json;
use tokio::sync::oneshot;

pub enum Reply<T> {
    Ready(ClientResult<T>),
    Gated(oneshot::Receiver<ClientResult<T>>),
}

/// Resource API answering from a script. Unscripted fetches return an empty
/// page, unscripted updates succeed.
pub struct ScriptedApi<R> {
    pages: Mutex<VecDeque<Reply<PageResult<R>>>>,
    updates: Mutex<VecDeque<Reply<()>>>,
    pub queries: Mutex<Vec<PageQuery>>,
    pub requests: Mutex<Vec<FieldRequest>>,
}

impl<R> ScriptedApi<R> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new(VecDeque::new()),
            updates: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn push_page(&self, result: ClientResult<PageResult<R>>) {
        self.pages.lock().push_back(Reply::Ready(result));
    }

    pub fn gate_page(&self) -> oneshot::Sender<ClientResult<PageResult<R>>> {
        let (tx, rx) = oneshot::channel();
        self.pages.lock().push_back(Reply::Gated(rx));
        tx
    }

    pub fn push_update(&self, result: ClientResult<()>) {
        self.updates.lock().push_back(Reply::Ready(result));
    }

    pub fn gate_update(&self) -> oneshot::Sender<ClientResult<()>> {
        let (tx, rx) = oneshot::channel();
        self.updates.lock().push_back(Reply::Gated(rx));
        tx
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().len()
    }

    pub fn last_query(&self) -> Option<PageQuery> {
        self.queries.lock().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

async fn answer<T: Default>(reply: Option<Reply<T>>) -> ClientResult<T> {
    match reply {
        Some(Reply::Ready(result)) => result,
        Some(Reply::Gated(rx)) => rx.await.unwrap_or_else(|_| Ok(T::default())),
        None => Ok(T::default()),
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for ScriptedApi<R> {
    async fn fetch_page(&self, query: &PageQuery) -> ClientResult<PageResult<R>> {
        self.queries.lock().push(query.clone());
        let reply = self.pages.lock().pop_front();
        answer(reply).await
    }

    async fn update(&self, request: FieldRequest) -> ClientResult<()> {
        self.requests.lock().push(request);
        let reply = self.updates.lock().pop_front();
        answer(reply).await
    }
}

pub struct Harness<R: Resource> {
    pub api: Arc<ScriptedApi<R>>,
    pub list: ListController<R>,
    pub navigator: Arc<MemoryNavigator>,
    pub session: SessionStore,
    pub notifier: Notifier,
}

pub fn harness<R: Resource>(location: &str, mode: SearchMode) -> Harness<R> {
    let api = ScriptedApi::new();
    let navigator = Arc::new(MemoryNavigator::new(location));
    let session = SessionStore::in_memory();
    session.set("test-token").unwrap();
    let notifier = Notifier::new();
    let ctx = ListContext {
        session: session.clone(),
        navigator: navigator.clone(),
        notifier: notifier.clone(),
        page_size: 5,
        search_mode: mode,
        login_route: "/auth".to_string(),
    };
    let list = ListController::new(api.clone(), ctx);
    Harness {
        api,
        list,
        navigator,
        session,
        notifier,
    }
}

pub fn employee(id: i64, name: &str, is_active: bool) -> Employee {
    serde_json::from_value(json!({ "id": id, "name": name, "isActive": is_active })).unwrap()
}

pub fn employee_page(names: &[&str], total_count: u64) -> PageResult<Employee> {
    let records = names
        .iter()
        .enumerate()
        .map(|(i, name)| employee(i as i64 + 1, name, false))
        .collect();
    PageResult::new(records, total_count)
}

/// Wait until the scripted API has seen `n` fetches.
pub async fn wait_for_queries<R>(api: &ScriptedApi<R>, n: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while api.query_count() < n {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("fetch was never issued");
}

pub async fn wait_for_requests<R>(api: &ScriptedApi<R>, n: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while api.request_count() < n {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("update was never issued");
}
