//! license-sweep-common - Shared types and constants
//!
//! This crate holds the types shared by the sweep engine and the cloud
//! adapter, without any HTTP or runtime dependencies.
//!
//! ## Modules
//!
//! - [`defaults`]: Query limits, completion message and concurrency defaults
//! - [`license`]: License modes, database editions and the BYOL update payload
//! - [`resource_kind`]: Supported resource families and their dispatch tags
//! - [`sweep_result`]: The result envelope returned by one invocation

pub mod defaults;
pub mod license;
pub mod resource_kind;
pub mod sweep_result;

// Re-export commonly used types
pub use license::{DatabaseEdition, LicenseModel, LicenseState, LicenseUpdate};
pub use resource_kind::ResourceKind;
pub use sweep_result::SweepResult;
