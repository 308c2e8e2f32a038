//! Shared test utilities for license-sweep
//!
//! Lives in its own crate so integration tests can share fakes without
//! pulling test code into the library.
//!
//! ## Modules
//!
//! - [`fake`]: In-memory regions implementing the engine capabilities
//! - [`logs`]: Tracing layer capturing events for assertions
//! - [`keys`]: RSA signing key fixtures

pub mod fake;
pub mod keys;
pub mod logs;

// Re-export commonly used items
pub use fake::{Call, FakeConnector, FakeRegion};
pub use keys::{TEST_KEY_PEM, write_key_file};
pub use logs::{CapturedLog, LogCapture};
