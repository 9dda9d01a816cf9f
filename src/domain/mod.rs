//! Domain layer - token model and errors

pub mod error;
pub mod token;

pub use error::DomainError;
