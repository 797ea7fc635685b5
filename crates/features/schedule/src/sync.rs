use crate::error::{ScheduleError, ScheduleResult};
use crate::schedule::{MachineSchedule, MachineScheduleData};
use serde_json::Value as Json;
use tracing::{info, warn};
use twin_codec::Canonicalizer;
use twin_kernel::repository::Repository;

/// Moves a [`MachineSchedule`] to and from a [`Repository`] of submodel documents,
/// keyed by the submodel identifier.
#[derive(Debug)]
pub struct ScheduleSync<R> {
    repository: R,
    canonicalizer: Canonicalizer,
}

impl<R: Repository<Json>> ScheduleSync<R> {
    pub fn new(repository: R) -> Self {
        Self { repository, canonicalizer: Canonicalizer::default() }
    }

    /// Rules used for outgoing documents.
    #[must_use]
    pub fn with_canonicalizer(mut self, canonicalizer: Canonicalizer) -> Self {
        self.canonicalizer = canonicalizer;
        self
    }

    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Replaces the stored document with the canonical form of `schedule`.
    ///
    /// # Errors
    /// [`ScheduleError::Remote`] when the repository refuses the replace,
    /// [`ScheduleError::Codec`] when the schedule cannot be written.
    pub async fn push(&self, schedule: &MachineSchedule) -> ScheduleResult<()> {
        let identifier = schedule.identifier();
        let document = schedule.to_value(&self.canonicalizer)?;
        let result = self.repository.replace(identifier, document).await;
        if !result.success {
            return Err(remote_error("replace", identifier, result.messages));
        }
        info!(identifier, "machine schedule pushed");
        Ok(())
    }

    /// Retrieves the stored document and extracts its schedule values.
    ///
    /// # Errors
    /// [`ScheduleError::Remote`] when nothing is stored under `identifier`,
    /// [`ScheduleError::Codec`] when the stored document is not an object.
    pub async fn pull(&self, identifier: &str) -> ScheduleResult<MachineScheduleData> {
        let result = self.repository.retrieve(identifier).await;
        let document = match result.entity {
            Some(document) if result.success => document,
            _ => return Err(remote_error("retrieve", identifier, result.messages)),
        };
        let data = MachineSchedule::parse(&document)?.data()?;
        info!(identifier, entries = data.entries.len(), "machine schedule pulled");
        Ok(data)
    }

    /// Pulls the document stored under the schedule's own identifier and applies it.
    ///
    /// # Errors
    /// The failures of [`ScheduleSync::pull`] and [`MachineSchedule::apply`].
    pub async fn pull_into(&self, schedule: &mut MachineSchedule) -> ScheduleResult<usize> {
        let data = self.pull(schedule.identifier()).await?;
        schedule.apply(&data)
    }
}

fn remote_error(operation: &'static str, identifier: &str, messages: Option<String>) -> ScheduleError {
    let messages = messages.unwrap_or_default();
    warn!(operation, identifier, %messages, "repository call failed");
    ScheduleError::Remote {
        message: format!("{operation} of '{identifier}' failed: {messages}").into(),
        context: None,
    }
}
