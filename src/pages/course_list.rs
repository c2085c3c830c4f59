//! Course catalogue: filter, create, and move courses through their
//! lifecycle.
//!
//! SYSTEM CONTEXT
//! ==============
//! Departments load once and feed both the filter and the create form.
//! Every mutating action reloads the course list on success.

#[cfg(test)]
#[path = "course_list_test.rs"]
mod course_list_test;

use leptos::prelude::*;

use crate::components::form_error::FormError;
use crate::components::nav_bar::NavBar;
use crate::coordinator::use_coordinator;
use crate::net::api;
use crate::net::http::{ApiClient, ApiError};
use crate::net::types::{Course, CoursePayload, CourseQuery, CourseStatus, Department, DepartmentQuery};
use crate::util::form::{FormStatus, FormSubmission};
use crate::util::validate::{optional, required};

// =============================================================================
// ROW ACTIONS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CourseAction {
    Activate,
    Deactivate,
    Archive,
    Delete,
}

impl CourseAction {
    fn label(self) -> &'static str {
        match self {
            Self::Activate => "Activate",
            Self::Deactivate => "Deactivate",
            Self::Archive => "Archive",
            Self::Delete => "Delete",
        }
    }

    /// Actions that make sense from `status`. Archived courses can only be
    /// deleted.
    fn available(status: CourseStatus) -> &'static [Self] {
        match status {
            CourseStatus::Draft | CourseStatus::Inactive => &[Self::Activate, Self::Archive, Self::Delete],
            CourseStatus::Active => &[Self::Deactivate, Self::Archive, Self::Delete],
            CourseStatus::Archived => &[Self::Delete],
            CourseStatus::Unknown => &[Self::Delete],
        }
    }

    async fn run(self, client: &ApiClient, course_id: &str) -> Result<(), ApiError> {
        match self {
            Self::Activate => api::activate_course(client, course_id).await,
            Self::Deactivate => api::deactivate_course(client, course_id).await,
            Self::Archive => api::archive_course(client, course_id).await,
            Self::Delete => api::delete_course(client, course_id).await,
        }
    }
}

// =============================================================================
// FORM HELPERS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
struct CourseDraft {
    code: String,
    name: String,
    credit: String,
    department_id: String,
    description: String,
}

fn parse_credit(raw: &str) -> Result<f64, &'static str> {
    let raw = required(raw, "Enter the credit value.")?;
    match raw.parse::<f64>() {
        Ok(credit) if credit.is_finite() && credit > 0.0 => Ok(credit),
        _ => Err("Credit must be a positive number."),
    }
}

impl CourseDraft {
    fn to_payload(&self) -> Result<CoursePayload, &'static str> {
        let code = required(&self.code, "Enter a course code.")?.to_owned();
        let name = required(&self.name, "Enter a course name.")?.to_owned();
        let credit = parse_credit(&self.credit)?;
        Ok(CoursePayload {
            code,
            name,
            credit,
            department_id: optional(&self.department_id),
            description: self.description.trim().to_owned(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct CourseFilter {
    keyword: String,
    department_id: String,
    status: String,
}

impl CourseFilter {
    fn to_query(&self) -> CourseQuery {
        let status = match self.status.as_str() {
            "DRAFT" => Some(CourseStatus::Draft),
            "ACTIVE" => Some(CourseStatus::Active),
            "INACTIVE" => Some(CourseStatus::Inactive),
            "ARCHIVED" => Some(CourseStatus::Archived),
            _ => None,
        };
        CourseQuery { keyword: optional(&self.keyword), department_id: optional(&self.department_id), status }
    }
}

fn department_name(departments: &[Department], id: Option<&str>) -> String {
    id.and_then(|id| departments.iter().find(|d| d.id == id))
        .map_or_else(|| "-".to_owned(), |d| d.name.clone())
}

const FILTER_STATUSES: &[CourseStatus] =
    &[CourseStatus::Draft, CourseStatus::Active, CourseStatus::Inactive, CourseStatus::Archived];

// =============================================================================
// PAGE
// =============================================================================

#[component]
pub fn CourseListPage() -> impl IntoView {
    let coordinator = use_coordinator();

    let filter = RwSignal::new(CourseFilter::default());
    let query = RwSignal::new(CourseQuery::default());
    let draft = RwSignal::new(CourseDraft::default());
    let create_status = RwSignal::new(FormStatus::default());
    let action_status = RwSignal::new(FormStatus::default());

    let departments = RwSignal::new(Vec::<Department>::new());
    let reload = RwSignal::new(0_u32);

    {
        let client = coordinator.with_value(|c| c.api.clone());
        leptos::task::spawn_local(async move {
            match api::list_departments(&client, &DepartmentQuery::default()).await {
                Ok(list) => departments.set(list),
                Err(e) => log::warn!("failed to load departments: {e}"),
            }
        });
    }

    let courses = LocalResource::new(move || {
        reload.track();
        let client = coordinator.with_value(|c| c.api.clone());
        let query = query.get();
        async move { api::list_courses(&client, &query).await }
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        query.set(filter.with_untracked(CourseFilter::to_query));
    };

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if create_status.get_untracked().loading {
            return;
        }
        let payload = match draft.with_untracked(CourseDraft::to_payload) {
            Ok(payload) => payload,
            Err(message) => {
                create_status.set(FormStatus::failed(message));
                return;
            }
        };
        let client = coordinator.with_value(|c| c.api.clone());
        leptos::task::spawn_local(async move {
            let form = FormSubmission::new(create_status, |payload: CoursePayload| {
                let client = client.clone();
                async move { api::create_course(&client, &payload).await }
            });
            if let Some(course) = form.submit(payload).await {
                log::info!("course created: {}", course.id);
                draft.set(CourseDraft::default());
                reload.update(|n| *n += 1);
            }
        });
    };

    let run_action = move |action: CourseAction, course_id: String| {
        if action_status.get_untracked().loading {
            return;
        }
        let client = coordinator.with_value(|c| c.api.clone());
        leptos::task::spawn_local(async move {
            let form = FormSubmission::new(action_status, |course_id: String| {
                let client = client.clone();
                async move { action.run(&client, &course_id).await }
            });
            if form.submit(course_id).await.is_some() {
                reload.update(|n| *n += 1);
            }
        });
    };

    let department_options = move || {
        departments
            .get()
            .into_iter()
            .filter(|d| d.enabled)
            .map(|d| view! { <option value=d.id>{d.name}</option> })
            .collect::<Vec<_>>()
    };

    let draft_input = move |placeholder: &'static str, get: fn(&CourseDraft) -> &String, set: fn(&mut CourseDraft, String)| {
        view! {
            <input
                class="form__input"
                type="text"
                placeholder=placeholder
                prop:value=move || draft.with(|d| get(d).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| set(d, value));
                }
            />
        }
    };

    view! {
        <NavBar/>
        <main class="page course-page">
            <h1>"Courses"</h1>

            <form class="course-page__filters" on:submit=on_search>
                <input
                    class="form__input"
                    type="search"
                    placeholder="Search by name or code"
                    prop:value=move || filter.with(|f| f.keyword.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| f.keyword = value);
                    }
                />
                <select
                    class="form__input"
                    prop:value=move || filter.with(|f| f.department_id.clone())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| f.department_id = value);
                    }
                >
                    <option value="">"All departments"</option>
                    {department_options}
                </select>
                <select
                    class="form__input"
                    prop:value=move || filter.with(|f| f.status.clone())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| f.status = value);
                    }
                >
                    <option value="">"Any status"</option>
                    {FILTER_STATUSES
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                        .collect::<Vec<_>>()}
                </select>
                <button class="btn" type="submit">"Search"</button>
            </form>

            <FormError status=action_status/>

            <Suspense fallback=move || view! { <p>"Loading courses..."</p> }>
                {move || {
                    courses
                        .get()
                        .map(|result| match result {
                            Err(e) => view! { <p class="form-error">{e.to_string()}</p> }.into_any(),
                            Ok(list) if list.is_empty() => {
                                view! { <p class="course-page__empty">"No courses found."</p> }.into_any()
                            }
                            Ok(list) => {
                                let known = departments.get();
                                view! {
                                    <table class="course-table">
                                        <thead>
                                            <tr>
                                                <th>"Code"</th>
                                                <th>"Name"</th>
                                                <th>"Credit"</th>
                                                <th>"Department"</th>
                                                <th>"Status"</th>
                                                <th></th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {list
                                                .into_iter()
                                                .map(|course| course_row(course, &known, run_action))
                                                .collect::<Vec<_>>()}
                                        </tbody>
                                    </table>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>

            <form class="card form course-page__create" on:submit=on_create>
                <h2>"New course"</h2>
                {draft_input("Code", |d| &d.code, |d, v| d.code = v)}
                {draft_input("Name", |d| &d.name, |d, v| d.name = v)}
                {draft_input("Credit", |d| &d.credit, |d, v| d.credit = v)}
                <select
                    class="form__input"
                    prop:value=move || draft.with(|d| d.department_id.clone())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.department_id = value);
                    }
                >
                    <option value="">"No department"</option>
                    {department_options}
                </select>
                {draft_input("Description", |d| &d.description, |d, v| d.description = v)}
                <FormError status=create_status/>
                <button class="btn btn--primary" type="submit" disabled=move || create_status.get().loading>
                    "Create course"
                </button>
            </form>
        </main>
    }
}

fn course_row(
    course: Course,
    departments: &[Department],
    run_action: impl Fn(CourseAction, String) + Copy + 'static,
) -> impl IntoView {
    let department = department_name(departments, course.department_id.as_deref());
    let buttons = CourseAction::available(course.status)
        .iter()
        .map(|&action| {
            let course_id = course.id.clone();
            view! {
                <button class="btn btn--small" on:click=move |_| run_action(action, course_id.clone())>
                    {action.label()}
                </button>
            }
        })
        .collect::<Vec<_>>();
    view! {
        <tr>
            <td>{course.code}</td>
            <td>{course.name}</td>
            <td>{course.credit}</td>
            <td>{department}</td>
            <td>{course.status.as_str()}</td>
            <td class="course-table__actions">{buttons}</td>
        </tr>
    }
}
