//! Typed helpers for every remote endpoint the portal consumes.
//!
//! Each helper takes an [`ApiClient`] so auth headers and envelope handling
//! stay in one place. Helpers that address a resource by id check the id
//! first and fail with [`ApiError::Validation`] before any request is sent.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{ApiClient, ApiError};
use super::types::{
    AuthResponseData, ChangePasswordPayload, Course, CoursePayload, CourseQuery, Department, DepartmentPayload,
    DepartmentQuery, LoginPayload, RegisterPayload, ResetPasswordPayload, SendResetCodePayload,
    UpdateProfilePayload, UpdateUserInfoPayload, UserInfo, UserProfile,
};

fn require_id<'a>(id: &'a str, what: &str) -> Result<&'a str, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::Validation(format!("missing {what} id")));
    }
    Ok(id)
}

fn auth_info_endpoint(user_id: &str) -> String {
    format!("/auth/{user_id}/info")
}

fn change_password_endpoint(user_id: &str) -> String {
    format!("/auth/{user_id}/change-password")
}

fn user_info_endpoint(user_id: &str) -> String {
    format!("/user/{user_id}/info")
}

fn user_profile_endpoint(user_id: &str) -> String {
    format!("/user/{user_id}/profile")
}

/// `/{resource}/{id}/{verb}` for the course/department lifecycle actions.
fn resource_action_endpoint(resource: &str, id: &str, verb: &str) -> String {
    format!("/{resource}/{id}/{verb}")
}

// =============================================================================
// AUTH
// =============================================================================

/// `POST /auth/login`.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn login(client: &ApiClient, payload: &LoginPayload) -> Result<AuthResponseData, ApiError> {
    client.post("/auth/login", payload).await
}

/// `POST /auth/register`.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn register(client: &ApiClient, payload: &RegisterPayload) -> Result<AuthResponseData, ApiError> {
    client.post("/auth/register", payload).await
}

/// `POST /auth/logout`.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    client.post_empty("/auth/logout").await
}

/// `GET /auth/{id}/info`: the signed-in user's full record.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn fetch_current_user(client: &ApiClient, user_id: &str) -> Result<UserInfo, ApiError> {
    let user_id = require_id(user_id, "user")?;
    client.get(&auth_info_endpoint(user_id), &[]).await
}

/// `POST /auth/{id}/change-password`.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn change_password(
    client: &ApiClient,
    user_id: &str,
    payload: &ChangePasswordPayload,
) -> Result<(), ApiError> {
    let user_id = require_id(user_id, "user")?;
    client.post(&change_password_endpoint(user_id), payload).await
}

/// `POST /auth/password-reset/send-code`.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn send_reset_code(client: &ApiClient, payload: &SendResetCodePayload) -> Result<(), ApiError> {
    client.post("/auth/password-reset/send-code", payload).await
}

/// `POST /auth/password-reset/reset`.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn reset_password(client: &ApiClient, payload: &ResetPasswordPayload) -> Result<(), ApiError> {
    client.post("/auth/password-reset/reset", payload).await
}

// =============================================================================
// USER
// =============================================================================

/// `GET /user/{id}/info`.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn fetch_user_info(client: &ApiClient, user_id: &str) -> Result<UserInfo, ApiError> {
    let user_id = require_id(user_id, "user")?;
    client.get(&user_info_endpoint(user_id), &[]).await
}

/// `POST /user/{id}/info`.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn update_user_info(
    client: &ApiClient,
    user_id: &str,
    payload: &UpdateUserInfoPayload,
) -> Result<(), ApiError> {
    let user_id = require_id(user_id, "user")?;
    client.post(&user_info_endpoint(user_id), payload).await
}

/// `GET /user/{id}/profile`.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn fetch_user_profile(client: &ApiClient, user_id: &str) -> Result<UserProfile, ApiError> {
    let user_id = require_id(user_id, "user")?;
    client.get(&user_profile_endpoint(user_id), &[]).await
}

/// `POST /user/{id}/profile`.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn update_user_profile(
    client: &ApiClient,
    user_id: &str,
    payload: &UpdateProfilePayload,
) -> Result<(), ApiError> {
    let user_id = require_id(user_id, "user")?;
    client.post(&user_profile_endpoint(user_id), payload).await
}

// =============================================================================
// COURSE
// =============================================================================

/// `GET /course/list`.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn list_courses(client: &ApiClient, query: &CourseQuery) -> Result<Vec<Course>, ApiError> {
    let courses: Option<Vec<Course>> = client.get("/course/list", &query.to_query_pairs()).await?;
    Ok(courses.unwrap_or_default())
}

/// `POST /course/create`.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn create_course(client: &ApiClient, payload: &CoursePayload) -> Result<Course, ApiError> {
    client.post("/course/create", payload).await
}

/// `POST /course/{id}/update`.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn update_course(client: &ApiClient, course_id: &str, payload: &CoursePayload) -> Result<(), ApiError> {
    let course_id = require_id(course_id, "course")?;
    client
        .post(&resource_action_endpoint("course", course_id, "update"), payload)
        .await
}

async fn course_action(client: &ApiClient, course_id: &str, verb: &str) -> Result<(), ApiError> {
    let course_id = require_id(course_id, "course")?;
    client
        .post_empty(&resource_action_endpoint("course", course_id, verb))
        .await
}

/// `POST /course/{id}/delete`.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn delete_course(client: &ApiClient, course_id: &str) -> Result<(), ApiError> {
    course_action(client, course_id, "delete").await
}

/// `POST /course/{id}/activate`.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn activate_course(client: &ApiClient, course_id: &str) -> Result<(), ApiError> {
    course_action(client, course_id, "activate").await
}

/// `POST /course/{id}/deactivate`.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn deactivate_course(client: &ApiClient, course_id: &str) -> Result<(), ApiError> {
    course_action(client, course_id, "deactivate").await
}

/// `POST /course/{id}/archive`.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn archive_course(client: &ApiClient, course_id: &str) -> Result<(), ApiError> {
    course_action(client, course_id, "archive").await
}

// =============================================================================
// DEPARTMENT
// =============================================================================

/// `GET /department/list`.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn list_departments(client: &ApiClient, query: &DepartmentQuery) -> Result<Vec<Department>, ApiError> {
    let departments: Option<Vec<Department>> = client.get("/department/list", &query.to_query_pairs()).await?;
    Ok(departments.unwrap_or_default())
}

/// `POST /department/create`.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn create_department(client: &ApiClient, payload: &DepartmentPayload) -> Result<Department, ApiError> {
    client.post("/department/create", payload).await
}

/// `POST /department/{id}/update`.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn update_department(
    client: &ApiClient,
    department_id: &str,
    payload: &DepartmentPayload,
) -> Result<(), ApiError> {
    let department_id = require_id(department_id, "department")?;
    client
        .post(&resource_action_endpoint("department", department_id, "update"), payload)
        .await
}

async fn department_action(client: &ApiClient, department_id: &str, verb: &str) -> Result<(), ApiError> {
    let department_id = require_id(department_id, "department")?;
    client
        .post_empty(&resource_action_endpoint("department", department_id, verb))
        .await
}

/// `POST /department/{id}/delete`.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn delete_department(client: &ApiClient, department_id: &str) -> Result<(), ApiError> {
    department_action(client, department_id, "delete").await
}

/// `POST /department/{id}/enable`.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn enable_department(client: &ApiClient, department_id: &str) -> Result<(), ApiError> {
    department_action(client, department_id, "enable").await
}

/// `POST /department/{id}/disable`.
///
/// # Errors
///
/// Returns a validation error for a blank id, otherwise any client error.
pub async fn disable_department(client: &ApiClient, department_id: &str) -> Result<(), ApiError> {
    department_action(client, department_id, "disable").await
}
