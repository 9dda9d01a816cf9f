//! Infrastructure layer - token signing and logging setup

pub mod auth;
pub mod logging;
