//! Region client construction
//!
//! Builds one client per subscribed region. A region whose client cannot be
//! built is logged and left out; the sweep continues with the rest.

use super::capabilities::RegionCapabilities;
use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Derives a region-scoped client from a shared base context.
pub trait RegionConnector {
    type Client: RegionCapabilities;

    /// Build the client for `region`
    fn connect(&self, region: &str) -> Result<Self::Client>;
}

/// Region name to region client, fixed once built.
///
/// Clients are shared with the search and handler tasks behind an `Arc`;
/// the bundle exposes no way to add or remove regions after construction.
#[derive(Debug)]
pub struct ClientBundle<R> {
    clients: BTreeMap<String, Arc<R>>,
}

impl<R: RegionCapabilities> ClientBundle<R> {
    /// Connect to every region in `regions`, skipping the ones that fail.
    ///
    /// Duplicate region names do not fail; the last connection wins.
    pub fn build<C>(connector: &C, regions: &[String]) -> Self
    where
        C: RegionConnector<Client = R>,
    {
        debug!(count = regions.len(), "Building region clients");

        let mut clients = BTreeMap::new();
        for region in regions {
            match connector.connect(region) {
                Ok(client) => {
                    if clients.insert(region.clone(), Arc::new(client)).is_some() {
                        warn!(region = %region, "Duplicate region subscription, replacing client");
                    }
                }
                Err(e) => {
                    error!(region = %region, error = ?e, "Problem building region client, skipping region");
                }
            }
        }

        debug!(count = clients.len(), "Region clients assembled");
        Self { clients }
    }

    /// Assemble a bundle from already-built clients
    pub fn from_clients(clients: impl IntoIterator<Item = (String, R)>) -> Self {
        Self {
            clients: clients
                .into_iter()
                .map(|(region, client)| (region, Arc::new(client)))
                .collect(),
        }
    }

    pub fn get(&self, region: &str) -> Option<&Arc<R>> {
        self.clients.get(region)
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.clients.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<R>)> {
        self.clients.iter().map(|(region, client)| (region.as_str(), client))
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
