//! Institution scholarship form: attaches scholarship terms to one of the
//! institution's own courses.

#[cfg(test)]
#[path = "scholarship_test.rs"]
mod scholarship_test;

use leptos::prelude::*;
use session::marketplace::{Course, CourseDraft, ScholarshipKind};

use crate::components::field::text_field;
use crate::state::remote::Remote;
#[cfg(feature = "csr")]
use crate::state::session::current_token;
use crate::state::session::{use_marketplace, use_session};

pub const COURSE_REQUIRED: &str = "Please select a course.";
pub const AMOUNT_REQUIRED: &str = "Please enter a scholarship amount.";
pub const PERCENTAGE_REQUIRED: &str = "Please enter a scholarship percentage.";
pub const ELIGIBILITY_REQUIRED: &str = "Please enter eligibility criteria.";
pub const DEADLINE_REQUIRED: &str = "Please select a deadline.";
pub const COURSES_FAILED: &str = "Error fetching courses.";
pub const SAVE_FAILED: &str = "Error updating course.";
pub const SCHOLARSHIP_SAVED: &str = "Scholarship updated successfully!";

/// Raw scholarship form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScholarshipForm {
    pub course_id: String,
    pub title: String,
    pub kind: ScholarshipKind,
    /// Flat amount or percentage, read according to `kind`.
    pub amount: String,
    pub eligibility: String,
    pub deadline: String,
}

impl ScholarshipForm {
    /// Select `course_id` from `courses`, carrying its title along.
    pub fn select_course(&mut self, courses: &[Course], course_id: &str) {
        self.course_id = course_id.to_owned();
        self.title = courses.iter().find(|c| c.id == course_id).and_then(|c| c.title.clone()).unwrap_or_default();
    }

    /// The course id and update to submit, or the first problem with the form.
    pub fn validate(&self) -> Result<(String, CourseDraft), &'static str> {
        if self.course_id.is_empty() {
            return Err(COURSE_REQUIRED);
        }
        if self.amount.trim().is_empty() {
            return Err(match self.kind {
                ScholarshipKind::Flat => AMOUNT_REQUIRED,
                ScholarshipKind::Percentage => PERCENTAGE_REQUIRED,
            });
        }
        if self.eligibility.trim().is_empty() {
            return Err(ELIGIBILITY_REQUIRED);
        }
        if self.deadline.is_empty() {
            return Err(DEADLINE_REQUIRED);
        }
        let draft = CourseDraft {
            title: self.title.clone(),
            description: None,
            scholarship_type: self.kind,
            scholarship_amount: self.amount.trim().to_owned(),
            eligibility_criteria: self.eligibility.trim().to_owned(),
            deadline: self.deadline.clone(),
        };
        Ok((self.course_id.clone(), draft))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Notice {
    Saved,
    Failed(String),
}

#[component]
pub fn ScholarshipPage() -> impl IntoView {
    let session = use_session();
    let market = use_marketplace();
    let courses = RwSignal::new(Remote::<Vec<Course>>::Loading);
    let form = RwSignal::new(ScholarshipForm::default());
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "csr")]
    {
        let market = market.get_value();
        let token = current_token(session);
        leptos::task::spawn_local(async move {
            courses.set(Remote::settle(market.own_courses(token.as_deref()).await, COURSES_FAILED));
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (course_id, draft) = match form.with(ScholarshipForm::validate) {
            Ok(submission) => submission,
            Err(message) => {
                notice.set(Some(Notice::Failed(message.to_owned())));
                return;
            }
        };
        notice.set(None);
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let market = market.get_value();
            let token = current_token(session);
            leptos::task::spawn_local(async move {
                match market.update_course(token.as_deref(), &course_id, &draft).await {
                    Ok(updated) => {
                        courses.update(|c| {
                            if let Remote::Ready(list) = c {
                                if let Some(slot) = list.iter_mut().find(|course| course.id == updated.id) {
                                    *slot = updated;
                                }
                            }
                        });
                        form.set(ScholarshipForm::default());
                        notice.set(Some(Notice::Saved));
                    }
                    Err(e) => notice.set(Some(Notice::Failed(e.request_message(SAVE_FAILED)))),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (course_id, draft, market, session);
    };

    let course_options = move || {
        courses.with(|c| {
            c.ready()
                .map(|list| {
                    list.iter()
                        .map(|course| view! { <option value=course.id.clone()>{course.title().to_owned()}</option> })
                        .collect_view()
                })
        })
    };

    view! {
        <section class="dashboard__section">
            <h2>"Create scholarship"</h2>
            {move || match courses.get() {
                Remote::Failed(message) => Some(view! { <p class="auth-error">{message}</p> }),
                Remote::Loading | Remote::Ready(_) => None,
            }}
            <form class="scholarship-form" on:submit=on_submit>
                <select
                    class="auth-input"
                    prop:value=move || form.with(|f| f.course_id.clone())
                    on:change=move |ev| {
                        let id = event_target_value(&ev);
                        let list = courses.with_untracked(|c| c.ready().cloned().unwrap_or_default());
                        form.update(|f| f.select_course(&list, &id));
                    }
                >
                    <option value="">"Select a course"</option>
                    {course_options}
                </select>
                <select
                    class="auth-input"
                    on:change=move |ev| {
                        let kind = if event_target_value(&ev) == "percentage" {
                            ScholarshipKind::Percentage
                        } else {
                            ScholarshipKind::Flat
                        };
                        form.update(|f| f.kind = kind);
                    }
                >
                    <option value="flat" selected=move || form.with(|f| f.kind == ScholarshipKind::Flat)>"Flat amount"</option>
                    <option value="percentage" selected=move || form.with(|f| f.kind == ScholarshipKind::Percentage)>
                        "Percentage"
                    </option>
                </select>
                {move || {
                    let label = if form.with(|f| f.kind == ScholarshipKind::Percentage) {
                        "Scholarship percentage"
                    } else {
                        "Scholarship amount"
                    };
                    text_field(form, label, "number", |f| &f.amount, |f| &mut f.amount)
                }}
                {text_field(form, "Eligibility criteria", "text", |f| &f.eligibility, |f| &mut f.eligibility)}
                {text_field(form, "Deadline", "date", |f| &f.deadline, |f| &mut f.deadline)}
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    "Save scholarship"
                </button>
            </form>
            {move || {
                notice.get().map(|notice| match notice {
                    Notice::Saved => view! { <p class="settings-notice">{SCHOLARSHIP_SAVED}</p> }.into_any(),
                    Notice::Failed(message) => view! { <p class="auth-error">{message}</p> }.into_any(),
                })
            }}
        </section>
    }
}
