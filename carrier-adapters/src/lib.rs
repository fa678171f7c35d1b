//! Data sources that supply carrier snapshot records.
//!
//! Each module exposes an implementation of the shared [`traits::CarrierSource`]
//! interface: [`saferweb`] talks to the SaferWebAPI snapshot endpoint and
//! [`fixture`] serves records from memory.

#![warn(missing_docs, clippy::pedantic)]

pub mod fixture;
pub mod saferweb;
pub mod traits;

mod http_client;
