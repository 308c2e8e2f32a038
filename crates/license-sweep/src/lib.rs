//! license-sweep - multi-region license correction
//!
//! Discovers license-included resources in every subscribed region and
//! switches them to bring-your-own-license in one invocation.
//!
//! - [`engine`]: concurrent discovery and correction, independent of any cloud API
//! - [`oci`]: signed REST clients implementing the engine's capabilities
//! - [`invoke`]: startup sequence turning a [`config::SweepConfig`] into a result

pub mod config;
pub mod engine;
pub mod invoke;
pub mod logging;
pub mod oci;

pub use invoke::invoke;
