//! Core types and domain logic for Coolant Pro, a coolant-chemistry log for
//! machine-shop field technicians.
//!
//! # Data flow
//!
//! 1. The caller supplies raw readings and a shop/machine identity
//!    ([`visit::VisitRequest`]).
//! 2. [`recall::most_recent`] fetches the machine's previous reading, if any.
//! 3. [`chemistry::assess`] computes the concentration and dosing
//!    recommendations, escalating on a repeated low pH.
//! 4. The reading is appended through a [`store::RecordStore`].
//!
//! The engine itself is stateless; persistence is supplied by the caller
//! (see the `coolant-db` crate for the SQLite implementation).

pub mod chemistry;
pub mod config;
pub mod error;
pub mod notes;
pub mod reading;
pub mod recall;
pub mod store;
pub mod visit;

#[cfg(test)]
mod testing;

pub use error::{CoolantError, Result};
pub use reading::{MetalCategory, ServiceReading};
pub use store::{ReadingQuery, RecordStore, SortOrder};
