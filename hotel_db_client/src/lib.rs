//! Table-scoped Postgres operations for the hotel domain, one function per
//! operation. Every write funnels its error through
//! [`error::classify`] so callers can match on a structured kind instead of
//! scraping message text.

pub mod error;
pub mod guests;
pub mod occupation_guests;
pub mod occupations;
pub mod rooms;
pub mod users;
