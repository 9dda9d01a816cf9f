//! Request and response types

pub mod envelope;
pub mod error;
pub mod json;

pub use envelope::{Envelope, FAILURE_CODE, SUCCESS_CODE};
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
