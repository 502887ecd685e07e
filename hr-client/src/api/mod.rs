//! Typed REST resources
//!
//! Each dashboard resource declares where its list lives ([`ResourceSpec`]);
//! [`ResourceApi`] is the seam list controllers and field updaters talk
//! through, implemented by [`ApiClient`] and by fakes in tests.

mod attendance;
mod auth;
mod employee;
mod profile;
mod salary;
mod user;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use shared::{ListResponse, PageQuery, PageResult, Record};

use crate::ClientResult;
use crate::http::ApiClient;

pub(crate) use employee::status_path as employee_status_path;
pub(crate) use salary::status_path as salary_status_path;

/// Static description of one paginated resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Human name used in messages ("employee", "salary", ...)
    pub name: &'static str,
    /// List endpoint, relative to the base URL
    pub list_path: &'static str,
    /// Dashboard route the list is shown on
    pub route: &'static str,
    /// Whether the list endpoint accepts `search`
    pub searchable: bool,
}

/// A record type served by a paginated list endpoint.
pub trait Resource: Record + DeserializeOwned {
    const SPEC: ResourceSpec;
}

/// One field update as it goes on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRequest {
    pub method: Method,
    pub path: String,
    pub body: Value,
}

#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync {
    async fn fetch_page(&self, query: &PageQuery) -> ClientResult<PageResult<R>>;

    async fn update(&self, request: FieldRequest) -> ClientResult<()>;
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for ApiClient {
    async fn fetch_page(&self, query: &PageQuery) -> ClientResult<PageResult<R>> {
        let spec = R::SPEC;
        let resp: ListResponse<R> = self
            .get(spec.list_path, &query.to_params(spec.searchable))
            .await?;
        tracing::debug!(
            resource = spec.name,
            page = query.page,
            rows = resp.data.len(),
            total = resp.total_count,
            "Page fetched"
        );
        Ok(resp.into())
    }

    async fn update(&self, request: FieldRequest) -> ClientResult<()> {
        let _: IgnoredAny = self
            .send(request.method, &request.path, Some(&request.body))
            .await?;
        Ok(())
    }
}
