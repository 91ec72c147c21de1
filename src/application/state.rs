use std::sync::Arc;

use crate::config::boot::BootSettings;
use crate::db::DbConn;
use crate::services::{
    BootService, BootStore, DbStore, HostResolver, InventoryService, ReverseDnsResolver,
    StaticResolver,
};

/// Shared hostname resolver
pub type SharedResolver = Arc<dyn HostResolver>;

/// Application state containing all shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
    pub boot: BootService,
    pub inventory: InventoryService,
    pub host_resolver: SharedResolver,
}

impl AppState {
    /// Wire the services over `db` with an explicit hostname resolver
    pub fn new(db: DbConn, settings: &BootSettings, host_resolver: SharedResolver) -> Self {
        let store: Arc<dyn BootStore> = Arc::new(DbStore::new(db.clone()));

        Self {
            db,
            boot: BootService::new(store.clone(), settings.locking),
            inventory: InventoryService::new(store, settings.default_time_between),
            host_resolver,
        }
    }

    /// Static table when one is configured, reverse DNS otherwise
    pub fn from_settings(db: DbConn, settings: &BootSettings) -> Self {
        let static_hosts = StaticResolver::parse(&settings.static_hosts);
        let resolver: SharedResolver = if static_hosts.is_empty() {
            Arc::new(ReverseDnsResolver)
        } else {
            tracing::info!("Using static host table for boot clients");
            Arc::new(static_hosts)
        };

        Self::new(db, settings, resolver)
    }
}
