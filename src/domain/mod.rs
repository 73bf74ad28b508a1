//! Domain models and types for awp.
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ItemId`], [`GroupId`], [`ContractId`])
//! - **Work items** ([`WorkItem`], [`ParentContext`], [`Versions`], [`ResourceKind`])
//! - **Error types** ([`AwpError`], [`ApiError`])
//! - **Result type aliases** ([`Result`], [`ApiResult`])
//!
//! # Error Handling
//!
//! Remote calls return [`ApiResult`], so a failed call is a value the caller must
//! inspect. Operations that abort a run return [`Result<T, AwpError>`]:
//!
//! ```rust
//! use awp::domain::{ApiError, AwpError, Result};
//!
//! fn root_fetch_failed() -> Result<()> {
//!     let call: std::result::Result<(), ApiError> =
//!         Err(ApiError::http(401, "401 Client Error: Unauthorized"));
//!     call?;
//!     Ok(())
//! }
//!
//! assert!(matches!(root_fetch_failed(), Err(AwpError::Api(_))));
//! ```

pub mod errors;
pub mod ids;
pub mod result;
pub mod work_item;

// Re-export commonly used types for convenience
pub use errors::{ApiError, AwpError};
pub use ids::{ContractId, GroupId, ItemId};
pub use result::{ApiResult, Result};
pub use work_item::{ParentContext, ResourceKind, Versions, WorkItem};
