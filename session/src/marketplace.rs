//! Typed client for the marketplace side of the REST API: institute and
//! student profiles, courses with their scholarships, and applications.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages hold a [`Marketplace`] next to the session store and pass the
//! current bearer token into every call. Calls made without a token go out
//! anonymously; the API decides what an anonymous caller may see.
//!
//! File uploads (profile pictures, cover photos, documents) are not part of
//! this client; profiles are created from their JSON fields only.

#[cfg(test)]
#[path = "marketplace_test.rs"]
mod marketplace_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AuthError;
use crate::search::InstituteFilter;
use crate::transport::{ApiRequest, ApiTransport};

pub const INSTITUTE_PROFILES_PATH: &str = "/instituteprofile";
pub const OWN_INSTITUTE_PROFILE_PATH: &str = "/instituteprofile/id";
pub const INSTITUTE_FILTER_PATH: &str = "/instituteprofile/filter";
pub const STUDENT_PROFILES_PATH: &str = "/studentprofile";
pub const OWN_STUDENT_PROFILE_PATH: &str = "/studentprofile/id";
pub const STUDENT_ACCOUNT_PATH: &str = "/auth/users/student/id";
pub const COURSES_PATH: &str = "/course";
pub const OWN_COURSES_PATH: &str = "/course/institute";
pub const STUDENT_APPLICATIONS_PATH: &str = "/application/id";
pub const INSTITUTE_APPLICATIONS_PATH: &str = "/application/institute";

fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}

#[must_use]
pub fn institute_profile_path(user_id: &str) -> String {
    format!("{OWN_INSTITUTE_PROFILE_PATH}/{}", segment(user_id))
}

#[must_use]
pub fn institute_courses_path(institute_id: &str) -> String {
    format!("{OWN_COURSES_PATH}/{}", segment(institute_id))
}

#[must_use]
pub fn course_path(course_id: &str) -> String {
    format!("{COURSES_PATH}/{}", segment(course_id))
}

/// Target of both "apply to course" (`POST`) and "set status" (`PUT`).
#[must_use]
pub fn application_path(id: &str) -> String {
    format!("/application/{}", segment(id))
}

#[must_use]
pub fn application_detail_path(application_id: &str) -> String {
    format!("{STUDENT_APPLICATIONS_PATH}/{}", segment(application_id))
}

#[must_use]
pub fn application_check_path(course_id: &str) -> String {
    format!("/application/check/{}", segment(course_id))
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl Location {
    #[must_use]
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self { city: Some(city.into()), country: Some(country.into()) }
    }

    /// `"City, Country"`, skipping missing parts.
    #[must_use]
    pub fn label(&self) -> String {
        [self.city.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, rename = "officialEmail")]
    pub official_email: Option<String>,
    #[serde(default, rename = "phoneNumber")]
    pub phone_number: Option<String>,
}

/// A course offered by an institute, with its scholarship terms.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "scholarshipType")]
    pub scholarship_type: Option<String>,
    /// Number or string, depending on who wrote it.
    #[serde(default, rename = "scholarshipAmount")]
    pub scholarship_amount: Option<Value>,
    #[serde(default)]
    pub eligibility_criteria: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
}

impl Course {
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled course")
    }

    /// Scholarship amount as display text, if set.
    #[must_use]
    pub fn amount_label(&self) -> Option<String> {
        match self.scholarship_amount.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct InstituteProfile {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    /// Owning account; the key for [`Marketplace::institute_profile`].
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, rename = "coverPhoto")]
    pub cover_photo: Option<String>,
    #[serde(default)]
    pub courses: Option<Vec<Course>>,
}

impl InstituteProfile {
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        self.courses.as_deref().unwrap_or_default()
    }
}

/// Body of `POST /instituteprofile` and `PUT /instituteprofile/id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InstituteProfileDraft {
    pub name: String,
    pub university: String,
    pub description: String,
    pub contact: Contact,
    pub location: Location,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

/// Student profile, both as sent on create/update and as read back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StudentProfile {
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    /// Date of birth, `YYYY-MM-DD` or an ISO timestamp.
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

/// `GET /auth/users/student/id`: the account plus its profile, once created.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct StudentAccount {
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default, rename = "studentProfile")]
    pub student_profile: Option<StudentProfile>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScholarshipKind {
    #[default]
    Flat,
    Percentage,
}

/// Body of `POST /course` and `PUT /course/:id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CourseDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "scholarshipType")]
    pub scholarship_type: ScholarshipKind,
    /// Flat amount or percentage, depending on `scholarship_type`.
    #[serde(rename = "scholarshipAmount")]
    pub scholarship_amount: String,
    pub eligibility_criteria: String,
    pub deadline: String,
}

/// A foreign key the API may or may not have populated.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Id(String),
    Populated {
        #[serde(default, rename = "_id")]
        id: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl Reference {
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Populated { title, .. } => title.as_deref(),
            Self::Id(_) => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Populated { name, .. } => name.as_deref(),
            Self::Id(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Submitted,
    Accepted,
    Rejected,
    /// Any status this client does not know, shown as under review.
    #[default]
    #[serde(other)]
    Pending,
}

impl ApplicationStatus {
    /// Known statuses by wire name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Submitted" => Some(Self::Submitted),
            "Accepted" => Some(Self::Accepted),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Pending => "In Review",
        }
    }

    /// Whether an institute can still accept or reject it.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Submitted | Self::Pending)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, rename = "course_id")]
    pub course: Option<Reference>,
    #[serde(default, rename = "userId")]
    pub applicant: Option<Reference>,
    #[serde(default, rename = "Status")]
    pub status: ApplicationStatus,
    #[serde(default, rename = "SubmittedDate")]
    pub submitted_date: Option<String>,
}

impl Application {
    #[must_use]
    pub fn course_title(&self) -> &str {
        self.course.as_ref().and_then(Reference::title).unwrap_or("No Title Available")
    }

    /// Calendar date part of the submission timestamp.
    #[must_use]
    pub fn submitted_on(&self) -> Option<&str> {
        let raw = self.submitted_date.as_deref()?;
        Some(raw.split('T').next().unwrap_or(raw))
    }
}

/// `GET /application/id/:id`: the application and the applicant's profile.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApplicationDetail {
    pub application: Application,
    #[serde(default, rename = "studentProfile")]
    pub student_profile: Option<StudentProfile>,
}

/// Body of `POST /application/:course_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApplicationDraft {
    /// RFC 3339 timestamp supplied by the host clock.
    #[serde(rename = "SubmittedDate")]
    pub submitted_date: String,
}

/// Dashboard overview tallies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub submitted: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl StatusCounts {
    #[must_use]
    pub fn tally(applications: &[Application]) -> Self {
        applications.iter().fold(Self::default(), |mut counts, application| {
            counts.total += 1;
            match application.status {
                ApplicationStatus::Submitted => counts.submitted += 1,
                ApplicationStatus::Accepted => counts.accepted += 1,
                ApplicationStatus::Rejected => counts.rejected += 1,
                ApplicationStatus::Pending => {}
            }
            counts
        })
    }
}

#[derive(Deserialize)]
struct Data<T> {
    data: T,
}

#[derive(Deserialize)]
struct Applications {
    #[serde(default)]
    applications: Vec<Application>,
}

#[derive(Deserialize)]
struct UpdatedApplication {
    application: Application,
}

#[derive(Deserialize)]
struct Check {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Serialize)]
struct StatusChange {
    status: ApplicationStatus,
}

// =============================================================================
// Client
// =============================================================================

pub struct Marketplace<T> {
    transport: T,
}

impl<T: ApiTransport> Marketplace<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, AuthError> {
        let body = self.transport.send(&request).await?;
        serde_json::from_str(&body).map_err(|e| {
            log::warn!("{} {} returned an unexpected body: {e}", request.method.as_str(), request.path);
            AuthError::MalformedResponse(e.to_string())
        })
    }

    async fn submit(&self, request: ApiRequest) -> Result<(), AuthError> {
        self.transport.send(&request).await.map(drop)
    }

    // ---- institutes -------------------------------------------------------

    /// Every institute profile.
    ///
    /// # Errors
    ///
    /// Transport, rejection, or body-shape failures.
    pub async fn institute_profiles(&self, token: Option<&str>) -> Result<Vec<InstituteProfile>, AuthError> {
        let request = ApiRequest::get(INSTITUTE_PROFILES_PATH).authorized(token);
        self.fetch::<Data<Vec<InstituteProfile>>>(request).await.map(|d| d.data)
    }

    /// Institutes matching `filter`. A 404 means no matches.
    ///
    /// # Errors
    ///
    /// Transport, non-404 rejection, or body-shape failures.
    pub async fn search_institutes(
        &self,
        token: Option<&str>,
        filter: &InstituteFilter,
    ) -> Result<Vec<InstituteProfile>, AuthError> {
        let request = ApiRequest::get(format!("{INSTITUTE_FILTER_PATH}?{}", filter.query())).authorized(token);
        match self.fetch::<Data<Vec<InstituteProfile>>>(request).await {
            Ok(found) => Ok(found.data),
            Err(AuthError::Rejected { status: 404, .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Profile of the institute account `user_id`.
    ///
    /// # Errors
    ///
    /// Transport, rejection, or body-shape failures.
    pub async fn institute_profile(&self, token: Option<&str>, user_id: &str) -> Result<InstituteProfile, AuthError> {
        let request = ApiRequest::get(institute_profile_path(user_id)).authorized(token);
        self.fetch::<Data<InstituteProfile>>(request).await.map(|d| d.data)
    }

    /// Profile of the signed-in institute.
    ///
    /// # Errors
    ///
    /// Transport, rejection, or body-shape failures.
    pub async fn own_institute_profile(&self, token: Option<&str>) -> Result<InstituteProfile, AuthError> {
        let request = ApiRequest::get(OWN_INSTITUTE_PROFILE_PATH).authorized(token);
        self.fetch::<Data<InstituteProfile>>(request).await.map(|d| d.data)
    }

    /// # Errors
    ///
    /// Transport or rejection failures.
    pub async fn create_institute_profile(
        &self,
        token: Option<&str>,
        draft: &InstituteProfileDraft,
    ) -> Result<(), AuthError> {
        self.submit(ApiRequest::post(INSTITUTE_PROFILES_PATH, draft)?.authorized(token)).await
    }

    /// # Errors
    ///
    /// Transport or rejection failures.
    pub async fn update_institute_profile(
        &self,
        token: Option<&str>,
        draft: &InstituteProfileDraft,
    ) -> Result<(), AuthError> {
        self.submit(ApiRequest::put(OWN_INSTITUTE_PROFILE_PATH, draft)?.authorized(token)).await
    }

    // ---- students ---------------------------------------------------------

    /// The signed-in student's account and profile.
    ///
    /// # Errors
    ///
    /// Transport, rejection, or body-shape failures.
    pub async fn student_account(&self, token: Option<&str>) -> Result<StudentAccount, AuthError> {
        self.fetch(ApiRequest::get(STUDENT_ACCOUNT_PATH).authorized(token)).await
    }

    /// # Errors
    ///
    /// Transport or rejection failures.
    pub async fn create_student_profile(&self, token: Option<&str>, profile: &StudentProfile) -> Result<(), AuthError> {
        self.submit(ApiRequest::post(STUDENT_PROFILES_PATH, profile)?.authorized(token)).await
    }

    /// # Errors
    ///
    /// Transport or rejection failures.
    pub async fn update_student_profile(&self, token: Option<&str>, profile: &StudentProfile) -> Result<(), AuthError> {
        self.submit(ApiRequest::put(OWN_STUDENT_PROFILE_PATH, profile)?.authorized(token)).await
    }

    // ---- courses ----------------------------------------------------------

    /// Courses offered by the institute account `institute_id`.
    ///
    /// # Errors
    ///
    /// Transport, rejection, or body-shape failures.
    pub async fn institute_courses(&self, token: Option<&str>, institute_id: &str) -> Result<Vec<Course>, AuthError> {
        self.fetch(ApiRequest::get(institute_courses_path(institute_id)).authorized(token)).await
    }

    /// Courses of the signed-in institute.
    ///
    /// # Errors
    ///
    /// Transport, rejection, or body-shape failures.
    pub async fn own_courses(&self, token: Option<&str>) -> Result<Vec<Course>, AuthError> {
        self.fetch(ApiRequest::get(OWN_COURSES_PATH).authorized(token)).await
    }

    /// # Errors
    ///
    /// Transport, rejection, or body-shape failures.
    pub async fn create_course(&self, token: Option<&str>, draft: &CourseDraft) -> Result<Course, AuthError> {
        self.fetch(ApiRequest::post(COURSES_PATH, draft)?.authorized(token)).await
    }

    /// Replace a course's details; also how scholarships are attached to a course.
    ///
    /// # Errors
    ///
    /// Transport, rejection, or body-shape failures.
    pub async fn update_course(
        &self,
        token: Option<&str>,
        course_id: &str,
        draft: &CourseDraft,
    ) -> Result<Course, AuthError> {
        self.fetch(ApiRequest::put(course_path(course_id), draft)?.authorized(token)).await
    }

    /// # Errors
    ///
    /// Transport or rejection failures.
    pub async fn delete_course(&self, token: Option<&str>, course_id: &str) -> Result<(), AuthError> {
        self.submit(ApiRequest::delete(course_path(course_id)).authorized(token)).await
    }

    // ---- applications -----------------------------------------------------

    /// Apply the signed-in student to `course_id`.
    ///
    /// # Errors
    ///
    /// Transport or rejection failures.
    pub async fn apply(&self, token: Option<&str>, course_id: &str, draft: &ApplicationDraft) -> Result<(), AuthError> {
        self.submit(ApiRequest::post(application_path(course_id), draft)?.authorized(token)).await
    }

    /// Status of the signed-in student's application to `course_id`, if any.
    ///
    /// # Errors
    ///
    /// Transport, rejection, or body-shape failures.
    pub async fn application_status_for_course(
        &self,
        token: Option<&str>,
        course_id: &str,
    ) -> Result<Option<ApplicationStatus>, AuthError> {
        let check: Check = self.fetch(ApiRequest::get(application_check_path(course_id)).authorized(token)).await?;
        Ok(check.status.as_deref().and_then(ApplicationStatus::parse))
    }

    /// # Errors
    ///
    /// Transport, rejection, or body-shape failures.
    pub async fn student_applications(&self, token: Option<&str>) -> Result<Vec<Application>, AuthError> {
        let request = ApiRequest::get(STUDENT_APPLICATIONS_PATH).authorized(token);
        self.fetch::<Applications>(request).await.map(|a| a.applications)
    }

    /// # Errors
    ///
    /// Transport, rejection, or body-shape failures.
    pub async fn institute_applications(&self, token: Option<&str>) -> Result<Vec<Application>, AuthError> {
        let request = ApiRequest::get(INSTITUTE_APPLICATIONS_PATH).authorized(token);
        self.fetch::<Applications>(request).await.map(|a| a.applications)
    }

    /// # Errors
    ///
    /// Transport, rejection, or body-shape failures.
    pub async fn application(&self, token: Option<&str>, application_id: &str) -> Result<ApplicationDetail, AuthError> {
        self.fetch(ApiRequest::get(application_detail_path(application_id)).authorized(token)).await
    }

    /// Accept or reject an application; returns it as stored afterwards.
    ///
    /// # Errors
    ///
    /// Transport, rejection, or body-shape failures.
    pub async fn set_application_status(
        &self,
        token: Option<&str>,
        application_id: &str,
        status: ApplicationStatus,
    ) -> Result<Application, AuthError> {
        let request = ApiRequest::put(application_path(application_id), &StatusChange { status })?.authorized(token);
        self.fetch::<UpdatedApplication>(request).await.map(|u| u.application)
    }
}
