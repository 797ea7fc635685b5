//! Bijection between the domain status labels and [`OrderState`].

use crate::state::OrderState;
use twin_domain::status::{ActionStatus, StepStatus};

macro_rules! status_mapping {
    ($status:ident) => {
        impl From<$status> for OrderState {
            fn from(status: $status) -> Self {
                match status {
                    $status::Open => Self::Created,
                    $status::Planned => Self::Planned,
                    $status::Executing => Self::Executing,
                    $status::Suspended => Self::Suspended,
                    $status::Done => Self::Completed,
                    $status::Aborted => Self::Aborted,
                    $status::Error => Self::Error,
                }
            }
        }

        impl From<OrderState> for $status {
            fn from(state: OrderState) -> Self {
                match state {
                    OrderState::Created => Self::Open,
                    OrderState::Planned => Self::Planned,
                    OrderState::Executing => Self::Executing,
                    OrderState::Suspended => Self::Suspended,
                    OrderState::Completed => Self::Done,
                    OrderState::Aborted => Self::Aborted,
                    OrderState::Error => Self::Error,
                }
            }
        }
    };
}

status_mapping!(ActionStatus);
status_mapping!(StepStatus);
