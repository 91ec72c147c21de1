pub mod boot;
pub mod db_store;
pub mod hostname;
pub mod inventory;
pub mod memory;
pub mod policy;
pub mod store;
pub mod template;

pub use boot::{BootError, BootLocking, BootService};
pub use db_store::DbStore;
pub use hostname::{HostResolveError, HostResolver, ReverseDnsResolver, StaticResolver};
pub use inventory::InventoryService;
pub use memory::MemoryStore;
pub use store::{BootStore, StoreError};
