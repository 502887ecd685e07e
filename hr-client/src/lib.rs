//! HR Client - headless core of the HR admin dashboard
//!
//! Talks to the HR backend through one authenticated HTTP client, and drives
//! the dashboard lists (employees, attendance, salary, profiles, users) with
//! a generic paginated controller plus optimistic status toggles.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod http;
pub mod list;
pub mod location;
pub mod navigator;
pub mod notify;
pub mod optimistic;
pub mod search;
pub mod session;

pub use api::{FieldRequest, Resource, ResourceApi, ResourceSpec};
pub use config::{ClientConfig, ConfigError, SearchMode};
pub use dashboard::Dashboard;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use http::ApiClient;
pub use list::{ListContext, ListController, LoadOutcome, PagePhase};
pub use navigator::{MemoryNavigator, Navigator};
pub use notify::{Level, Notification, Notifier};
pub use optimistic::{
    EMPLOYEE_ACTIVE, InFlightGuard, InFlightSet, OptimisticUpdater, SALARY_PAID, StatusField,
    UpdateMethod,
};
pub use session::{
    CredentialBackend, FileBackend, MemoryBackend, SessionEvent, SessionStore, StorageError,
};

// Re-export shared types for convenience
pub use shared::models;
pub use shared::{PageQuery, PageResult, Pagination, Record, RecordId};
