use twin_domain::status::{ActionStatus, StepStatus};

#[test]
fn labels_parse_case_insensitively() {
    assert_eq!(ActionStatus::from_label("EXECUTING"), ActionStatus::Executing);
    assert_eq!(StepStatus::from_label(" Done "), StepStatus::Done);
}

#[test]
fn unknown_labels_read_as_open() {
    assert_eq!(ActionStatus::from_label("finished"), ActionStatus::Open);
    assert_eq!(StepStatus::from_label(""), StepStatus::Open);
}

#[test]
fn labels_round_trip_through_serde() {
    for status in ActionStatus::ALL {
        let raw = serde_json::to_string(&status).expect("serialize");
        assert_eq!(raw, format!("\"{}\"", status.as_str()));
        let back: ActionStatus = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(back, status);
    }
}

#[test]
fn action_status_converts_to_step_status() {
    assert_eq!(StepStatus::from(ActionStatus::Suspended), StepStatus::Suspended);
    assert_eq!(StepStatus::from(ActionStatus::Done).to_string(), "done");
}
