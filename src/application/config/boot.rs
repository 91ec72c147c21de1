use std::env;

use crate::services::boot::BootLocking;

/// Seconds a `timed` machine stays in its cool-down window unless told otherwise
pub const DEFAULT_TIME_BETWEEN: i32 = 600;

/// Boot resolution settings
#[derive(Debug, Clone)]
pub struct BootSettings {
    /// How concurrent requests for one hostname are ordered (env: `BOOTSWITCH_BOOT_LOCKING`)
    pub locking: BootLocking,
    /// `time_between` for machines upserted without one (env: `BOOTSWITCH_DEFAULT_TIME_BETWEEN`)
    pub default_time_between: i32,
    /// `ip=name` pairs used instead of reverse DNS (env: `BOOTSWITCH_STATIC_HOSTS`)
    pub static_hosts: String,
    /// Parse error for an unrecognized `BOOTSWITCH_BOOT_LOCKING`, reported once logging is up
    pub locking_rejected: Option<String>,
}

/// Parse a locking mode, falling back to the default and keeping the reason
fn parse_locking(raw: Option<&str>) -> (BootLocking, Option<String>) {
    match raw.map(str::parse::<BootLocking>) {
        Some(Ok(locking)) => (locking, None),
        Some(Err(e)) => (BootLocking::default(), Some(e)),
        None => (BootLocking::default(), None),
    }
}

impl BootSettings {
    pub fn from_env() -> Self {
        let raw_locking = env::var("BOOTSWITCH_BOOT_LOCKING").ok();
        let (locking, locking_rejected) = parse_locking(raw_locking.as_deref());

        Self {
            locking,
            locking_rejected,
            default_time_between: env::var("BOOTSWITCH_DEFAULT_TIME_BETWEEN")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &i32| *v >= 0)
                .unwrap_or(DEFAULT_TIME_BETWEEN),
            static_hosts: env::var("BOOTSWITCH_STATIC_HOSTS").unwrap_or_default(),
        }
    }
}

impl Default for BootSettings {
    fn default() -> Self {
        Self {
            locking: BootLocking::PerHost,
            default_time_between: DEFAULT_TIME_BETWEEN,
            static_hosts: String::new(),
            locking_rejected: None,
        }
    }
}
