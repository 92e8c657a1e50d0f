use super::*;

#[test]
fn students_apply_once() {
    assert_eq!(apply_button(Some(Role::Student), None), ApplyButton { label: "Apply Now", enabled: true });
    let applied = apply_button(Some(Role::Student), Some(ApplicationStatus::Submitted));
    assert_eq!(applied, ApplyButton { label: "Application Submitted", enabled: false });
    assert!(!apply_button(Some(Role::Student), Some(ApplicationStatus::Rejected)).enabled);
}

#[test]
fn others_cannot_apply() {
    assert!(!apply_button(Some(Role::Institution), None).enabled);
    assert!(!apply_button(None, None).enabled);
}
