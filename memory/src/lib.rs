//! Bounded, in-memory log of conversational exchanges.
//!
//! A [`HistoryBuffer`] keeps at most `capacity` [`Exchange`] records in the
//! order they were appended, discarding the oldest record whenever a new one
//! would overflow it. Nothing here is persisted or synchronized; owners that
//! share a buffer across requests wrap it in a mutex.

pub mod exchange;
pub mod history;

pub use exchange::Exchange;
pub use history::{HistoryBuffer, Recent, DEFAULT_CAPACITY};
