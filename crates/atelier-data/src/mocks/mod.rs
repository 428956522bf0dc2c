//! Mock implementations for testing.
//!
//! Enabled for this crate's own tests and, through the `test-support`
//! feature, for downstream crates.

pub mod transport;

pub use transport::{MockReply, MockTransport};
