//! Switch policy evaluation.
//!
//! [`evaluate`] is pure: it decides which of a machine's two boot configs to
//! serve and what state the machine should carry afterwards. Writing that
//! state back is the boot engine's job.

use chrono::{DateTime, TimeDelta, Utc};

use crate::models::machine::SwitchType;
use crate::schemas::Machine;

/// Which of the machine's two boot configs to serve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootChoice {
    Default,
    Alternate,
}

impl BootChoice {
    fn from_flag(use_alternate: bool) -> Self {
        if use_alternate {
            BootChoice::Alternate
        } else {
            BootChoice::Default
        }
    }

    /// Title of the boot config this choice points at
    pub fn title<'a>(&self, machine: &'a Machine) -> &'a str {
        match self {
            BootChoice::Default => &machine.default_boot,
            BootChoice::Alternate => &machine.alternate_boot,
        }
    }
}

impl std::fmt::Display for BootChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BootChoice::Default => write!(f, "default"),
            BootChoice::Alternate => write!(f, "alternate"),
        }
    }
}

/// Machine state after a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateMutation {
    pub use_alternate: bool,
    pub last_boot: DateTime<Utc>,
}

impl StateMutation {
    pub fn apply(&self, machine: &mut Machine) {
        machine.use_alternate = self.use_alternate;
        machine.last_boot = self.last_boot;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub choice: BootChoice,
    pub mutation: StateMutation,
}

/// Decide which config `machine` gets when it boots at `now`
pub fn evaluate(machine: &Machine, now: DateTime<Utc>) -> Decision {
    let (choice, use_alternate) = match machine.switch_type {
        SwitchType::Switched => (BootChoice::from_flag(machine.use_alternate), machine.use_alternate),
        SwitchType::Alternating => (
            BootChoice::from_flag(machine.use_alternate),
            !machine.use_alternate,
        ),
        SwitchType::Timed => {
            // A machine booting again inside the window is assumed to be retrying
            let choice = if now < cooldown_end(machine) {
                BootChoice::Alternate
            } else {
                BootChoice::Default
            };
            (choice, machine.use_alternate)
        }
    };

    Decision {
        choice,
        mutation: StateMutation {
            use_alternate,
            last_boot: now,
        },
    }
}

/// End of the timed policy's window. Saturates instead of overflowing.
fn cooldown_end(machine: &Machine) -> DateTime<Utc> {
    let window = TimeDelta::seconds(i64::from(machine.time_between));
    machine
        .last_boot
        .checked_add_signed(window)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
