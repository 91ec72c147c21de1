//! Boot resolution engine.
//!
//! [`BootService::resolve`] loads a machine, runs its switch policy, records
//! the resulting state and renders the chosen boot config.
//! [`BootService::mark_complete`] handles the "finished booting" signal.
//!
//! Resolution is a read-modify-write of the machine record. With
//! [`BootLocking::Unsynchronized`] two concurrent requests for the same host
//! can both read the old state and one update is lost; [`BootLocking::PerHost`]
//! serializes them.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::schemas::Machine;
use crate::services::policy;
use crate::services::store::{BootStore, StoreError};
use crate::services::template::{self, TemplateError};

#[derive(Debug, Error)]
pub enum BootError {
    #[error("unknown machine '{0}'")]
    UnknownMachine(String),

    #[error("machine '{hostname}' references missing boot config '{title}'")]
    DanglingBootConfigReference { hostname: String, title: String },

    #[error("cannot render boot config '{title}': {source}")]
    Template {
        title: String,
        #[source]
        source: TemplateError,
    },

    #[error("store failure: {0}")]
    UpstreamStoreFailure(#[from] StoreError),
}

/// Ordering of concurrent requests for the same hostname
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootLocking {
    /// One request per hostname at a time
    #[default]
    PerHost,
    /// No coordination; concurrent updates to one machine may be lost
    Unsynchronized,
}

impl FromStr for BootLocking {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per-host" | "per_host" | "perhost" => Ok(BootLocking::PerHost),
            "none" | "off" | "unsynchronized" => Ok(BootLocking::Unsynchronized),
            other => Err(format!("unknown boot locking mode '{}'", other)),
        }
    }
}

impl std::fmt::Display for BootLocking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BootLocking::PerHost => write!(f, "per-host"),
            BootLocking::Unsynchronized => write!(f, "none"),
        }
    }
}

/// Lazily created async mutex per hostname. An entry lives only while some
/// request holds or waits on it.
#[derive(Default)]
struct HostLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

/// Exclusive hold on one hostname; dropping it releases the lock and prunes
/// the entry when nobody else is queued.
struct HostLease {
    guard: Option<OwnedMutexGuard<()>>,
    hostname: String,
    locks: Arc<HostLocks>,
}

impl Drop for HostLease {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.release(&self.hostname);
    }
}

impl HostLocks {
    async fn acquire(self: &Arc<Self>, hostname: &str) -> HostLease {
        let lock = self
            .locks
            .lock()
            .entry(hostname.to_string())
            .or_default()
            .clone();

        HostLease {
            guard: Some(lock.lock_owned().await),
            hostname: hostname.to_string(),
            locks: Arc::clone(self),
        }
    }

    fn release(&self, hostname: &str) {
        let mut locks = self.locks.lock();
        // The map holds one reference; any other is a holder or a waiter
        if locks
            .get(hostname)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(hostname);
        }
    }

    fn len(&self) -> usize {
        self.locks.lock().len()
    }
}

/// Boot resolution and completion over an injected [`BootStore`]
#[derive(Clone)]
pub struct BootService {
    store: Arc<dyn BootStore>,
    locking: BootLocking,
    locks: Arc<HostLocks>,
}

impl BootService {
    pub fn new(store: Arc<dyn BootStore>, locking: BootLocking) -> Self {
        Self {
            store,
            locking,
            locks: Arc::new(HostLocks::default()),
        }
    }

    pub fn locking(&self) -> BootLocking {
        self.locking
    }

    /// Number of hostnames with a live per-host lock
    pub fn locked_hosts(&self) -> usize {
        self.locks.len()
    }

    async fn serialize(&self, hostname: &str) -> Option<HostLease> {
        match self.locking {
            BootLocking::PerHost => Some(self.locks.acquire(hostname).await),
            BootLocking::Unsynchronized => None,
        }
    }

    async fn load_machine(&self, hostname: &str) -> Result<Machine, BootError> {
        self.store
            .get_machine(hostname)
            .await?
            .ok_or_else(|| BootError::UnknownMachine(hostname.to_string()))
    }

    /// Pick, record and render the boot config `hostname` gets at `now`.
    ///
    /// With `commit == false` nothing is written; the returned text is what a
    /// committed call would have produced at the same instant.
    pub async fn resolve(
        &self,
        hostname: &str,
        now: DateTime<Utc>,
        commit: bool,
    ) -> Result<String, BootError> {
        let _guard = self.serialize(hostname).await;

        let mut machine = self.load_machine(hostname).await?;
        let decision = policy::evaluate(&machine, now);
        decision.mutation.apply(&mut machine);

        if commit {
            let mutation = decision.mutation;
            if !self
                .store
                .save_switch_state(hostname, mutation.use_alternate, mutation.last_boot)
                .await?
            {
                return Err(BootError::UnknownMachine(hostname.to_string()));
            }
        }

        let title = decision.choice.title(&machine);
        tracing::info!(
            hostname = %hostname,
            switch_type = %machine.switch_type,
            choice = %decision.choice,
            boot_config = %title,
            commit,
            "Resolved boot config"
        );

        let boot_config = self.store.get_boot_config(title).await?.ok_or_else(|| {
            BootError::DanglingBootConfigReference {
                hostname: hostname.to_string(),
                title: title.to_string(),
            }
        })?;

        let variables: HashMap<String, String> = self
            .store
            .list_variables()
            .await?
            .into_iter()
            .map(|v| (v.key, v.value))
            .collect();

        template::render(&boot_config.config, &variables).map_err(|source| BootError::Template {
            title: title.to_string(),
            source,
        })
    }

    /// Record that `hostname` finished booting by flipping its `use_alternate`
    /// flag, whatever its switch type. Returns the new flag value.
    pub async fn mark_complete(&self, hostname: &str) -> Result<bool, BootError> {
        let _guard = self.serialize(hostname).await;

        let mut machine = self.load_machine(hostname).await?;
        machine.use_alternate = !machine.use_alternate;
        if !self
            .store
            .save_switch_state(hostname, machine.use_alternate, machine.last_boot)
            .await?
        {
            return Err(BootError::UnknownMachine(hostname.to_string()));
        }

        tracing::info!(
            hostname = %hostname,
            use_alternate = machine.use_alternate,
            "Boot completed"
        );
        Ok(machine.use_alternate)
    }
}
