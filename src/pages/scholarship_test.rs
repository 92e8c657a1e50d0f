use super::*;

fn courses() -> Vec<Course> {
    serde_json::from_value(serde_json::json!([
        { "_id": "c1", "title": "Applied Physics" },
        { "_id": "c2" }
    ]))
    .expect("courses")
}

fn filled() -> ScholarshipForm {
    let mut form = ScholarshipForm {
        amount: " 500 ".into(),
        eligibility: "GPA above 3.5".into(),
        deadline: "2026-12-01".into(),
        ..ScholarshipForm::default()
    };
    form.select_course(&courses(), "c1");
    form
}

#[test]
fn selecting_a_course_carries_its_title() {
    let mut form = ScholarshipForm::default();
    form.select_course(&courses(), "c1");
    assert_eq!(form.course_id, "c1");
    assert_eq!(form.title, "Applied Physics");

    form.select_course(&courses(), "c2");
    assert_eq!(form.title, "");
}

#[test]
fn course_is_checked_first() {
    let form = ScholarshipForm { course_id: String::new(), ..filled() };
    assert_eq!(form.validate(), Err(COURSE_REQUIRED));
}

#[test]
fn missing_amount_message_follows_the_kind() {
    let flat = ScholarshipForm { amount: "  ".into(), ..filled() };
    assert_eq!(flat.validate(), Err(AMOUNT_REQUIRED));

    let percentage = ScholarshipForm { kind: ScholarshipKind::Percentage, ..flat };
    assert_eq!(percentage.validate(), Err(PERCENTAGE_REQUIRED));
}

#[test]
fn eligibility_and_deadline_are_required() {
    let form = ScholarshipForm { eligibility: String::new(), ..filled() };
    assert_eq!(form.validate(), Err(ELIGIBILITY_REQUIRED));

    let form = ScholarshipForm { deadline: String::new(), ..filled() };
    assert_eq!(form.validate(), Err(DEADLINE_REQUIRED));
}

#[test]
fn valid_form_yields_trimmed_course_update() {
    let (id, draft) = filled().validate().expect("valid form");
    assert_eq!(id, "c1");
    assert_eq!(draft.title, "Applied Physics");
    assert_eq!(draft.scholarship_type, ScholarshipKind::Flat);
    assert_eq!(draft.scholarship_amount, "500");
    assert_eq!(draft.eligibility_criteria, "GPA above 3.5");
    assert_eq!(draft.deadline, "2026-12-01");
    assert_eq!(draft.description, None);
}
