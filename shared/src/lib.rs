//! Shared types for the HR admin client
//!
//! Wire types exchanged with the HR backend: per-resource record models,
//! list and error envelopes, auth payloads, and the page query.

pub mod client;
pub mod models;
pub mod query;
pub mod record;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use query::{DEFAULT_PAGE_SIZE, PageQuery, PageResult};
pub use record::{Record, RecordId, filter_records};
pub use response::{ApiResponse, ErrorBody, ListResponse, Pagination, total_pages};
