//! Shared data model for the order tracking worklist.
//!
//! Everything in this crate is host independent: filter controls, the
//! saved filter cache, pagination buckets, the comment accordion and the
//! table view model are plain state machines that the WASM frontend drives
//! and that unit tests drive directly.

pub mod error;
pub mod order_tracking;
pub mod shared;

pub use error::OrderTrackingError;
