use strum_macros::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Internal lifecycle state shared by steps and actions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum OrderState {
    Created,
    Planned,
    Executing,
    Suspended,
    Completed,
    Aborted,
    Error,
}

/// Named transition between two [`OrderState`]s.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Transition {
    Reset,
    Schedule,
    StartProduction,
    Suspend,
    Resume,
    EndProduction,
    Abort,
    Error,
    ReturnToCreated,
    ReturnToPlanned,
    ReturnToExecuting,
    ReturnToSuspended,
    ReturnToCompleted,
}
