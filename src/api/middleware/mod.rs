//! API middleware components

pub mod logging;
pub mod token_filter;

pub use logging::logging_middleware;
pub use token_filter::{
    token_filter, AuthenticatedUser, PublicPaths, INVALID_TOKEN_MESSAGE, MISSING_TOKEN_MESSAGE,
    USER_ID_HEADER,
};
