use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::error::ErrorBody;
use crate::transport::Method;

// =============================================================
// Fake transport
// =============================================================

#[derive(Default)]
struct RecordingTransport {
    replies: RefCell<VecDeque<Result<String, AuthError>>>,
    sent: RefCell<Vec<ApiRequest>>,
}

impl RecordingTransport {
    fn replying(replies: impl IntoIterator<Item = Result<serde_json::Value, AuthError>>) -> Self {
        let replies = replies.into_iter().map(|r| r.map(|v| v.to_string())).collect();
        Self { replies: RefCell::new(replies), ..Self::default() }
    }
}

#[async_trait(?Send)]
impl ApiTransport for RecordingTransport {
    async fn send(&self, request: &ApiRequest) -> Result<String, AuthError> {
        self.sent.borrow_mut().push(request.clone());
        self.replies.borrow_mut().pop_front().expect("unscripted request")
    }
}

fn market(replies: impl IntoIterator<Item = Result<serde_json::Value, AuthError>>) -> Marketplace<RecordingTransport> {
    Marketplace::new(RecordingTransport::replying(replies))
}

fn last(market: &Marketplace<RecordingTransport>) -> ApiRequest {
    market.transport().sent.borrow().last().cloned().expect("no request sent")
}

fn rejected(status: u16) -> AuthError {
    AuthError::Rejected { status, body: ErrorBody::default() }
}

// =============================================================
// Institutes
// =============================================================

#[test]
fn institute_profiles_unwrap_data_envelope() {
    let market = market([Ok(json!({ "data": [
        { "_id": "p1", "userId": "u1", "name": "Alpha", "location": { "city": "Pune", "country": "India" },
          "courses": [{ "_id": "c1", "title": "AI", "scholarshipAmount": 5000 }] },
        { "_id": "p2", "name": "Beta" }
    ] }))]);

    let profiles = block_on(market.institute_profiles(None)).unwrap();
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].user_id.as_deref(), Some("u1"));
    assert_eq!(profiles[0].courses()[0].amount_label().as_deref(), Some("5000"));
    assert!(profiles[1].courses().is_empty());

    let request = last(&market);
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path, INSTITUTE_PROFILES_PATH);
    assert_eq!(request.bearer, None);
}

#[test]
fn search_sends_filter_query_with_bearer() {
    let market = market([Ok(json!({ "data": [{ "name": "Alpha" }] }))]);
    let filter = InstituteFilter { cities: vec!["Pune".to_owned()], ..InstituteFilter::default() };

    let found = block_on(market.search_institutes(Some("tok"), &filter)).unwrap();
    assert_eq!(found.len(), 1);

    let request = last(&market);
    assert_eq!(request.path, "/instituteprofile/filter?city=Pune");
    assert_eq!(request.bearer.as_deref(), Some("tok"));
}

#[test]
fn search_treats_not_found_as_no_matches() {
    let market = market([Err(rejected(404))]);
    let found = block_on(market.search_institutes(None, &InstituteFilter::default())).unwrap();
    assert!(found.is_empty());
}

#[test]
fn search_surfaces_other_rejections() {
    let market = market([Err(rejected(500))]);
    let result = block_on(market.search_institutes(None, &InstituteFilter::default()));
    assert!(matches!(result, Err(AuthError::Rejected { status: 500, .. })));
}

#[test]
fn institute_profile_by_user_encodes_id() {
    let market = market([Ok(json!({ "data": { "name": "Alpha" } }))]);
    let profile = block_on(market.institute_profile(None, "a/b")).unwrap();
    assert_eq!(profile.name.as_deref(), Some("Alpha"));
    assert_eq!(last(&market).path, "/instituteprofile/id/a%2Fb");
}

#[test]
fn create_institute_profile_posts_json() {
    let market = market([Ok(json!({ "message": "created" }))]);
    let draft = InstituteProfileDraft {
        name: "Alpha".to_owned(),
        university: "Alpha University".to_owned(),
        description: "Research".to_owned(),
        contact: Contact { official_email: Some("a@b.co".to_owned()), phone_number: Some("123".to_owned()) },
        location: Location::new("Pune", "India"),
    };

    block_on(market.create_institute_profile(Some("tok"), &draft)).unwrap();

    let request = last(&market);
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, INSTITUTE_PROFILES_PATH);
    let body = request.body.unwrap();
    assert_eq!(body["contact"]["officialEmail"], "a@b.co");
    assert_eq!(body["location"]["country"], "India");
}

#[test]
fn body_shape_mismatch_is_malformed() {
    let market = market([Ok(json!({ "unexpected": true }))]);
    let result = block_on(market.own_institute_profile(Some("tok")));
    assert!(matches!(result, Err(AuthError::MalformedResponse(_))));
}

// =============================================================
// Students and courses
// =============================================================

#[test]
fn student_profile_uses_pascal_case_fields() {
    let market = market([Ok(json!({}))]);
    let profile = StudentProfile {
        student_name: "Asha".to_owned(),
        email: "asha@example.com".to_owned(),
        phone_number: "98".to_owned(),
        dob: "2001-02-03".to_owned(),
        address: Address { city: "Pune".to_owned(), country: "India".to_owned() },
        ..StudentProfile::default()
    };

    block_on(market.create_student_profile(Some("tok"), &profile)).unwrap();

    let body = last(&market).body.unwrap();
    assert_eq!(body["StudentName"], "Asha");
    assert_eq!(body["Address"]["City"], "Pune");
    assert_eq!(body["Dob"], "2001-02-03");
    assert!(body.get("ProfilePicture").is_none());
}

#[test]
fn student_account_without_profile() {
    let market = market([Ok(json!({ "user": { "name": "Asha" } }))]);
    let account = block_on(market.student_account(Some("tok"))).unwrap();
    assert!(account.student_profile.is_none());
    assert_eq!(last(&market).path, STUDENT_ACCOUNT_PATH);
}

#[test]
fn update_course_puts_scholarship_terms() {
    let market = market([Ok(json!({ "_id": "c1", "title": "AI", "scholarshipType": "percentage" }))]);
    let draft = CourseDraft {
        title: "AI".to_owned(),
        scholarship_type: ScholarshipKind::Percentage,
        scholarship_amount: "50".to_owned(),
        eligibility_criteria: "GPA 3".to_owned(),
        deadline: "2026-12-01".to_owned(),
        ..CourseDraft::default()
    };

    let course = block_on(market.update_course(Some("tok"), "c1", &draft)).unwrap();
    assert_eq!(course.scholarship_type.as_deref(), Some("percentage"));

    let request = last(&market);
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.path, "/course/c1");
    let body = request.body.unwrap();
    assert_eq!(body["scholarshipType"], "percentage");
    assert_eq!(body["scholarshipAmount"], "50");
    assert!(body.get("description").is_none());
}

#[test]
fn delete_course_sends_no_body() {
    let market = market([Ok(json!({ "message": "deleted" }))]);
    block_on(market.delete_course(Some("tok"), "c9")).unwrap();
    let request = last(&market);
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.path, "/course/c9");
    assert!(request.body.is_none());
}

#[test]
fn institute_courses_reads_bare_array() {
    let market = market([Ok(json!([{ "_id": "c1" }, { "_id": "c2", "title": "Law" }]))]);
    let courses = block_on(market.institute_courses(None, "u1")).unwrap();
    assert_eq!(courses[0].title(), "Untitled course");
    assert_eq!(courses[1].title(), "Law");
    assert_eq!(last(&market).path, "/course/institute/u1");
}

// =============================================================
// Applications
// =============================================================

#[test]
fn apply_posts_submission_date() {
    let market = market([Ok(json!({}))]);
    let draft = ApplicationDraft { submitted_date: "2026-10-19T08:00:00Z".to_owned() };
    block_on(market.apply(Some("tok"), "c1", &draft)).unwrap();

    let request = last(&market);
    assert_eq!(request.path, "/application/c1");
    assert_eq!(request.body.unwrap()["SubmittedDate"], "2026-10-19T08:00:00Z");
}

#[test]
fn check_maps_known_statuses_only() {
    let market = market([Ok(json!({ "status": "Accepted" })), Ok(json!({ "status": "Not Applied" })), Ok(json!({}))]);
    assert_eq!(block_on(market.application_status_for_course(Some("t"), "c1")).unwrap(), Some(ApplicationStatus::Accepted));
    assert_eq!(block_on(market.application_status_for_course(Some("t"), "c1")).unwrap(), None);
    assert_eq!(block_on(market.application_status_for_course(Some("t"), "c1")).unwrap(), None);
    assert_eq!(last(&market).path, "/application/check/c1");
}

#[test]
fn student_applications_read_populated_course() {
    let market = market([Ok(json!({ "applications": [
        { "_id": "a1", "course_id": { "_id": "c1", "title": "AI" }, "Status": "Submitted", "SubmittedDate": "2026-01-02T03:04:05Z" },
        { "_id": "a2", "course_id": "c2", "Status": "Withdrawn" }
    ] }))]);

    let applications = block_on(market.student_applications(Some("tok"))).unwrap();
    assert_eq!(applications[0].course_title(), "AI");
    assert_eq!(applications[0].submitted_on(), Some("2026-01-02"));
    assert_eq!(applications[1].course_title(), "No Title Available");
    assert_eq!(applications[1].status, ApplicationStatus::Pending);
    assert_eq!(applications[1].status.label(), "In Review");
    assert_eq!(last(&market).path, STUDENT_APPLICATIONS_PATH);
}

#[test]
fn application_detail_includes_student_profile() {
    let market = market([Ok(json!({
        "application": { "_id": "a1", "Status": "Submitted", "userId": { "_id": "u1", "name": "Asha" } },
        "studentProfile": { "StudentName": "Asha", "Address": { "City": "Pune", "Country": "India" } }
    }))]);

    let detail = block_on(market.application(Some("tok"), "a1")).unwrap();
    assert_eq!(detail.application.applicant.as_ref().and_then(Reference::name), Some("Asha"));
    assert_eq!(detail.student_profile.unwrap().address.city, "Pune");
    assert_eq!(last(&market).path, "/application/id/a1");
}

#[test]
fn set_status_puts_and_returns_application() {
    let market = market([Ok(json!({ "application": { "_id": "a1", "Status": "Accepted" } }))]);
    let updated = block_on(market.set_application_status(Some("tok"), "a1", ApplicationStatus::Accepted)).unwrap();
    assert_eq!(updated.status, ApplicationStatus::Accepted);
    assert!(!updated.status.is_open());

    let request = last(&market);
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.path, "/application/a1");
    assert_eq!(request.body, Some(json!({ "status": "Accepted" })));
}

#[test]
fn status_counts_tally_each_state() {
    let applications: Vec<Application> = serde_json::from_value(json!([
        { "_id": "1", "Status": "Submitted" },
        { "_id": "2", "Status": "Accepted" },
        { "_id": "3", "Status": "Accepted" },
        { "_id": "4", "Status": "Rejected" },
        { "_id": "5" }
    ]))
    .unwrap();

    let counts = StatusCounts::tally(&applications);
    assert_eq!(counts, StatusCounts { total: 5, submitted: 1, accepted: 2, rejected: 1 });
}

#[test]
fn location_label_skips_missing_parts() {
    assert_eq!(Location::new("Pune", "India").label(), "Pune, India");
    assert_eq!(Location { city: None, country: Some("Nepal".to_owned()) }.label(), "Nepal");
    assert_eq!(Location::default().label(), "");
}
