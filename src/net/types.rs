//! Wire DTOs for the remote campus API.
//!
//! DESIGN
//! ======
//! Every response arrives wrapped in an [`ApiEnvelope`]; the HTTP client
//! strips it so callers only ever see the `data` payload types below. Field
//! names are camelCase on the wire. Ids are accepted as JSON numbers or
//! strings and held as `String` so route paths can format them directly.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Envelope `code` that marks business success, independent of HTTP status.
pub const SUCCESS_CODE: i64 = 200;

/// The `{code, message, data}` wrapper every API response uses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// `true` when the envelope carries the success sentinel.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// `data` payload returned by login and registration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseData {
    pub token: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub real_name: String,
}

impl AuthResponseData {
    /// Split into the session token and a minimal user record.
    ///
    /// Contact/display fields stay empty until the next user refresh.
    pub fn into_session_parts(self) -> (String, UserInfo) {
        let user = UserInfo {
            id: Some(self.user_id),
            username: self.username,
            real_name: self.real_name,
            role: self.role,
            ..UserInfo::default()
        };
        (self.token, user)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub sdu_id: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub sdu_id: String,
    pub password: String,
    pub real_name: String,
    pub username: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordPayload {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SendResetCodePayload {
    pub email: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordPayload {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

// =============================================================================
// USER
// =============================================================================

/// Gender as carried on the wire: `0` male, `1` female, `2` unknown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl From<i64> for Gender {
    fn from(raw: i64) -> Self {
        match raw {
            0 => Self::Male,
            1 => Self::Female,
            _ => Self::Unknown,
        }
    }
}

impl From<Gender> for i64 {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => 0,
            Gender::Female => 1,
            Gender::Unknown => 2,
        }
    }
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Unknown => "Unknown",
        }
    }
}

/// The signed-in user's identity, contact, and display fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    /// Server-side user id; absent on records fetched before it was known.
    #[serde(deserialize_with = "deserialize_opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    pub real_name: String,
    pub gender: Gender,
    pub birthday: String,
    pub phone: String,
    pub email: String,
    pub avatar_url: String,
    #[serde(rename = "ethnic")]
    pub ethnicity: String,
    pub political_status: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Partial update for `/user/{id}/info`; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInfoPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(rename = "ethnic", skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub political_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateUserInfoPayload {
    /// Apply the present fields onto an existing user record.
    pub fn apply_to(&self, user: &mut UserInfo) {
        fn set(target: &mut String, value: Option<&String>) {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }
        set(&mut user.username, self.username.as_ref());
        set(&mut user.real_name, self.real_name.as_ref());
        set(&mut user.birthday, self.birthday.as_ref());
        set(&mut user.phone, self.phone.as_ref());
        set(&mut user.email, self.email.as_ref());
        set(&mut user.avatar_url, self.avatar_url.as_ref());
        set(&mut user.ethnicity, self.ethnicity.as_ref());
        set(&mut user.political_status, self.political_status.as_ref());
        set(&mut user.description, self.description.as_ref());
        if let Some(gender) = self.gender {
            user.gender = gender;
        }
    }
}

/// Public-facing profile subset served by `/user/{id}/profile`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub avatar_url: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// COURSE / DEPARTMENT
// =============================================================================

/// Lifecycle state of a course.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseStatus {
    Draft,
    Active,
    Inactive,
    Archived,
    #[default]
    #[serde(other)]
    Unknown,
}

impl CourseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Archived => "ARCHIVED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub credit: f64,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub department_id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: CourseStatus,
}

/// Body for course create and update.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub code: String,
    pub name: String,
    pub credit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    pub description: String,
}

/// Filters for `GET /course/list`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CourseQuery {
    pub keyword: Option<String>,
    pub department_id: Option<String>,
    pub status: Option<CourseStatus>,
}

impl CourseQuery {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(keyword) = self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            pairs.push(("keyword", keyword.to_owned()));
        }
        if let Some(department_id) = &self.department_id {
            pairs.push(("departmentId", department_id.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_owned()));
        }
        pairs
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Body for department create and update.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPayload {
    pub code: String,
    pub name: String,
    pub description: String,
}

/// Filters for `GET /department/list`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DepartmentQuery {
    pub keyword: Option<String>,
}

impl DepartmentQuery {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| vec![("keyword", k.to_owned())])
            .unwrap_or_default()
    }
}

// =============================================================================
// ID DESERIALIZATION
// =============================================================================

fn id_from_value<E: serde::de::Error>(value: serde_json::Value) -> Result<Option<String>, E> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(E::custom("expected id as number or string")),
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    id_from_value(value)?.ok_or_else(|| D::Error::custom("missing id"))
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    id_from_value(value)
}
