//! Domain status values carried by `Status` properties of steps and actions.
//!
//! Both enums share the same wire labels. Parsing is lenient: labels match
//! case-insensitively and anything unknown reads as `Open`.

use crate::constants::{
    STATUS_ABORTED, STATUS_DONE, STATUS_ERROR, STATUS_EXECUTING, STATUS_OPEN, STATUS_PLANNED,
    STATUS_SUSPENDED,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            Open,
            Planned,
            Executing,
            Suspended,
            Done,
            Aborted,
            Error,
        }

        impl $name {
            pub const ALL: [Self; 7] = [
                Self::Open,
                Self::Planned,
                Self::Executing,
                Self::Suspended,
                Self::Done,
                Self::Aborted,
                Self::Error,
            ];

            /// Wire label, e.g. `"executing"`.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    Self::Open => STATUS_OPEN,
                    Self::Planned => STATUS_PLANNED,
                    Self::Executing => STATUS_EXECUTING,
                    Self::Suspended => STATUS_SUSPENDED,
                    Self::Done => STATUS_DONE,
                    Self::Aborted => STATUS_ABORTED,
                    Self::Error => STATUS_ERROR,
                }
            }

            /// Parses a wire label. Unknown or empty labels read as `Open`.
            #[must_use]
            pub fn from_label(label: &str) -> Self {
                let label = label.trim();
                Self::ALL
                    .into_iter()
                    .find(|status| status.as_str().eq_ignore_ascii_case(label))
                    .unwrap_or_default()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(label: &str) -> Self {
                Self::from_label(label)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let label = String::deserialize(deserializer)?;
                Ok(Self::from_label(&label))
            }
        }
    };
}

status_enum!(
    /// Status of a single action within a step.
    ActionStatus
);

status_enum!(
    /// Status of a production step.
    StepStatus
);

impl From<ActionStatus> for StepStatus {
    fn from(status: ActionStatus) -> Self {
        match status {
            ActionStatus::Open => Self::Open,
            ActionStatus::Planned => Self::Planned,
            ActionStatus::Executing => Self::Executing,
            ActionStatus::Suspended => Self::Suspended,
            ActionStatus::Done => Self::Done,
            ActionStatus::Aborted => Self::Aborted,
            ActionStatus::Error => Self::Error,
        }
    }
}
