//! Oracle Cloud Infrastructure REST adapter
//!
//! Signed JSON calls against the identity, resource search, database,
//! analytics and integration services, exposed to the engine through
//! [`OciRegionClient`].

pub mod analytics;
pub mod context;
pub mod credentials;
pub mod database;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod identity;
pub mod integration;
pub mod region;
pub mod search;
pub mod signer;

pub use context::OciContext;
pub use credentials::ApiKeyCredentials;
pub use endpoints::{RegionName, ServiceEndpoints};
pub use error::{ApiError, CredentialError, RegionError};
pub use identity::{IdentityClient, RegionSubscription};
pub use region::{OciConnector, OciRegionClient};
