//! HTTP middleware components
//!
//! Request correlation and input extraction shared by all handlers.

pub mod request_id;
pub mod validation;

pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
pub use validation::{ApiJson, ApiQuery};
