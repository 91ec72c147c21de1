pub mod boot_config;
pub mod machine;
pub mod variable;

pub mod prelude {
    pub use super::boot_config::Entity as BootConfig;
    pub use super::machine::Entity as Machine;
    pub use super::variable::Entity as Variable;
}
