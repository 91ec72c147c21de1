//! Deriving a machine's hostname from the address it boots from.

use std::collections::HashMap;
use std::net::IpAddr;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostResolveError {
    #[error("cannot resolve hostname for {addr}: {reason}")]
    Lookup { addr: IpAddr, reason: String },

    #[error("no hostname known for {0}")]
    Unknown(IpAddr),
}

#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Short hostname (first DNS label) for `addr`
    async fn resolve(&self, addr: IpAddr) -> Result<String, HostResolveError>;
}

/// First label of a DNS name: `pxe01.lab.example` -> `pxe01`
pub fn short_hostname(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// PTR lookup through the system resolver
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseDnsResolver;

#[async_trait]
impl HostResolver for ReverseDnsResolver {
    async fn resolve(&self, addr: IpAddr) -> Result<String, HostResolveError> {
        let name = tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&addr))
            .await
            .map_err(|e| HostResolveError::Lookup {
                addr,
                reason: e.to_string(),
            })?
            .map_err(|e| HostResolveError::Lookup {
                addr,
                reason: e.to_string(),
            })?;

        tracing::debug!("Resolved {} to {}", addr, name);
        Ok(short_hostname(&name).to_string())
    }
}

/// Fixed address table, for networks without reverse DNS
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    hosts: HashMap<IpAddr, String>,
}

impl StaticResolver {
    pub fn new(hosts: HashMap<IpAddr, String>) -> Self {
        Self { hosts }
    }

    /// Parse `ip=name` pairs separated by commas, skipping malformed entries
    pub fn parse(table: &str) -> Self {
        let hosts = table
            .split(',')
            .filter_map(|entry| {
                let (ip, name) = entry.trim().split_once('=')?;
                let ip = ip.trim().parse().ok()?;
                let name = name.trim();
                (!name.is_empty()).then(|| (ip, short_hostname(name).to_string()))
            })
            .collect();
        Self { hosts }
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

#[async_trait]
impl HostResolver for StaticResolver {
    async fn resolve(&self, addr: IpAddr) -> Result<String, HostResolveError> {
        self.hosts
            .get(&addr)
            .cloned()
            .ok_or(HostResolveError::Unknown(addr))
    }
}
