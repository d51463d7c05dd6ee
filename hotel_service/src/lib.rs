//! Hotel operations service: domain workflows behind a storage port, with a
//! Postgres adapter. The HTTP surface lives in the binary.

pub mod domain;
pub mod outbound;
