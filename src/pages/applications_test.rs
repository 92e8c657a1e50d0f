use super::*;

#[test]
fn only_institutions_decide_open_applications() {
    assert!(can_decide(Role::Institution, ApplicationStatus::Submitted));
    assert!(can_decide(Role::Institution, ApplicationStatus::Pending));
    assert!(!can_decide(Role::Institution, ApplicationStatus::Accepted));
    assert!(!can_decide(Role::Institution, ApplicationStatus::Rejected));
    assert!(!can_decide(Role::Student, ApplicationStatus::Submitted));
}

#[test]
fn badges_group_open_statuses() {
    assert_eq!(status_class(ApplicationStatus::Submitted), status_class(ApplicationStatus::Pending));
    assert!(status_class(ApplicationStatus::Accepted).ends_with("--accepted"));
    assert!(status_class(ApplicationStatus::Rejected).ends_with("--rejected"));
}
