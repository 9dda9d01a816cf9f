//! Token domain
//!
//! Types shared by token issuance and verification: claims, the compact token
//! value, the expiry policy, the clock abstraction and the failure taxonomy.

mod claims;
mod clock;
mod compact;
mod error;
mod expiry;

pub use claims::{ClaimValue, Claims, EXPIRATION_CLAIM, ISSUED_AT_CLAIM, USER_ID_CLAIM};
pub use clock::{Clock, SystemClock};
pub use compact::Token;
pub use error::TokenError;
pub use expiry::ExpiryPolicy;

#[cfg(test)]
pub use clock::MockClock;
