use twin_codec::Canonicalizer;
use twin_kernel::repository::{MemoryRepository, Repository};
use twin_production::SchedulingValues;
use twin_schedule::{MachineSchedule, ScheduleError, ScheduleSync};

const IDENTIFIER: &str = "urn:twin:schedule:mill";

fn schedule() -> MachineSchedule {
    MachineSchedule::builder().identifier(IDENTIFIER).build()
}

#[tokio::test]
async fn pushed_schedules_can_be_pulled_back() {
    let repository = MemoryRepository::new();
    let empty = schedule().to_value(&Canonicalizer::default()).expect("value");
    assert!(repository.create(IDENTIFIER, empty).await.success);

    let mut local = schedule();
    local
        .add_schedule(&SchedulingValues::new("2025-01-01 08:00:00", "2999-01-01 00:00:00", "", ""))
        .expect("added");
    let sync = ScheduleSync::new(repository);
    sync.push(&local).await.expect("pushed");

    let mut remote_copy = schedule();
    assert_eq!(sync.pull_into(&mut remote_copy).await.expect("pulled"), 1);
    assert!(remote_copy.has_open_tasks());
    assert_eq!(remote_copy.last_time_updated(), local.last_time_updated());
    assert_eq!(remote_copy.data().expect("data"), local.data().expect("data"));
}

#[tokio::test]
async fn push_reports_a_refused_replace() {
    let sync = ScheduleSync::new(MemoryRepository::new());

    let error = sync.push(&schedule()).await.expect_err("nothing to replace");
    assert!(matches!(error, ScheduleError::Remote { .. }));
    assert!(error.to_string().contains(IDENTIFIER));
    assert_eq!(sync.repository().len(), 0);
}

#[tokio::test]
async fn pull_reports_a_missing_document() {
    let sync = ScheduleSync::new(MemoryRepository::new());

    let error = sync.pull("urn:twin:unknown").await.expect_err("not stored");
    assert!(matches!(error, ScheduleError::Remote { .. }));
}
