pub mod boot_config;
pub mod machine;
pub mod variable;

pub use boot_config::*;
pub use machine::*;
pub use variable::*;
