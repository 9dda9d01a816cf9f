//! Success response envelope

use serde::{Deserialize, Serialize};

/// `code` value of successful responses
pub const SUCCESS_CODE: i32 = 1;

/// `code` value of failed responses
pub const FAILURE_CODE: i32 = -1;

/// Body shape shared by every endpoint: `{"code": 1, "msg": "...", "data": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(msg: impl Into<String>, data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            msg: msg.into(),
            data: Some(data),
        }
    }
}
