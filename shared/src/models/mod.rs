//! Data models
//!
//! One row type per dashboard resource. Fields the dashboard reads are typed;
//! everything else rides along in `extra`.

pub mod attendance;
pub mod employee;
pub mod profile;
pub mod salary;
pub mod user;

// Re-exports
pub use attendance::*;
pub use employee::*;
pub use profile::*;
pub use salary::*;
pub use user::*;
