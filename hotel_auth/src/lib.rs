//! Bearer-token authentication for the hotel API.
//!
//! Session issuance lives with the external identity provider; this crate
//! only verifies the tokens it minted and turns their claims into the typed
//! [`models_hotel::user::UserContext`] the handlers consume.

pub mod error;
pub mod headers;
pub mod middleware;
pub mod token;
