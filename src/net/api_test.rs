use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::http::Method;
use crate::net::mock_transport::{MockTransport, client_with_token};
use crate::net::types::CourseStatus;

// =============================================================
// Endpoint paths
// =============================================================

#[test]
fn endpoint_helpers_format_expected_paths() {
    assert_eq!(auth_info_endpoint("7"), "/auth/7/info");
    assert_eq!(change_password_endpoint("7"), "/auth/7/change-password");
    assert_eq!(user_info_endpoint("u1"), "/user/u1/info");
    assert_eq!(user_profile_endpoint("u1"), "/user/u1/profile");
    assert_eq!(resource_action_endpoint("course", "c9", "archive"), "/course/c9/archive");
}

#[test]
fn require_id_trims_and_rejects_blank() {
    assert_eq!(require_id(" 12 ", "user"), Ok("12"));
    assert_eq!(require_id("  ", "user"), Err(ApiError::Validation("missing user id".to_owned())));
}

// =============================================================
// Validation happens before the network
// =============================================================

#[test]
fn blank_user_id_never_reaches_transport() {
    let transport = MockTransport::new();
    let client = client_with_token(&transport, Some("t"));

    let err = block_on(fetch_user_info(&client, "")).unwrap_err();
    assert_eq!(err.to_string(), "missing user id");
    let err = block_on(archive_course(&client, " ")).unwrap_err();
    assert_eq!(err.to_string(), "missing course id");
    let err = block_on(disable_department(&client, "")).unwrap_err();
    assert_eq!(err.to_string(), "missing department id");

    assert!(transport.requests().is_empty());
}

// =============================================================
// Auth
// =============================================================

#[test]
fn login_posts_credentials_and_returns_auth_data() {
    let transport = MockTransport::new();
    transport.push_ok(json!({
        "token": "tok",
        "userId": 5,
        "username": "alice",
        "role": "STUDENT",
        "realName": "Alice"
    }));
    let client = client_with_token(&transport, None);

    let payload = LoginPayload { sdu_id: "2021001".to_owned(), password: "secret".to_owned() };
    let data = block_on(login(&client, &payload)).unwrap();

    assert_eq!(data.token, "tok");
    assert_eq!(data.user_id, "5");
    let request = transport.last_request();
    assert_eq!(request.url, "https://api.test/auth/login");
    assert_eq!(request.method, Method::Post);
    let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "sduId": "2021001", "password": "secret" }));
}

#[test]
fn login_failure_surfaces_server_message() {
    let transport = MockTransport::new();
    transport.push_envelope(200, json!({ "code": 400, "message": "wrong password" }));
    let client = client_with_token(&transport, None);

    let err = block_on(login(&client, &LoginPayload::default())).unwrap_err();
    assert_eq!(err.to_string(), "wrong password");
}

#[test]
fn password_reset_flow_hits_both_endpoints() {
    let transport = MockTransport::new();
    transport.push_ok(json!(null));
    transport.push_ok(json!(null));
    let client = client_with_token(&transport, None);

    block_on(send_reset_code(&client, &SendResetCodePayload { email: "a@b.c".to_owned() })).unwrap();
    block_on(reset_password(&client, &ResetPasswordPayload {
        email: "a@b.c".to_owned(),
        code: "123456".to_owned(),
        new_password: "n3w".to_owned(),
    }))
    .unwrap();

    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec![
        "https://api.test/auth/password-reset/send-code".to_owned(),
        "https://api.test/auth/password-reset/reset".to_owned(),
    ]);
}

#[test]
fn change_password_targets_user_path() {
    let transport = MockTransport::new();
    transport.push_ok(json!(null));
    let client = client_with_token(&transport, Some("t"));

    let payload = ChangePasswordPayload { old_password: "a".to_owned(), new_password: "b".to_owned() };
    block_on(change_password(&client, "9", &payload)).unwrap();

    let request = transport.last_request();
    assert_eq!(request.url, "https://api.test/auth/9/change-password");
    assert_eq!(request.header("Authorization"), Some("Bearer t"));
}

// =============================================================
// User
// =============================================================

#[test]
fn fetch_current_user_reads_auth_info() {
    let transport = MockTransport::new();
    transport.push_ok(json!({ "id": 3, "username": "carol", "realName": "Carol" }));
    let client = client_with_token(&transport, Some("t"));

    let user = block_on(fetch_current_user(&client, "3")).unwrap();
    assert_eq!(user.id.as_deref(), Some("3"));
    assert_eq!(user.real_name, "Carol");
    assert_eq!(transport.last_request().url, "https://api.test/auth/3/info");
}

#[test]
fn update_profile_posts_to_profile_path() {
    let transport = MockTransport::new();
    transport.push_ok(json!(null));
    let client = client_with_token(&transport, Some("t"));

    let payload = UpdateProfilePayload { avatar_url: Some("https://img/x.png".to_owned()), ..Default::default() };
    block_on(update_user_profile(&client, "3", &payload)).unwrap();

    let request = transport.last_request();
    assert_eq!(request.url, "https://api.test/user/3/profile");
    assert_eq!(request.body.as_deref(), Some(r#"{"avatarUrl":"https://img/x.png"}"#));
}

// =============================================================
// Course / department
// =============================================================

#[test]
fn list_courses_passes_filters_and_accepts_null_data() {
    let transport = MockTransport::new();
    transport.push_ok(json!(null));
    let client = client_with_token(&transport, Some("t"));

    let query = CourseQuery { status: Some(CourseStatus::Active), ..CourseQuery::default() };
    let courses = block_on(list_courses(&client, &query)).unwrap();

    assert!(courses.is_empty());
    assert_eq!(transport.last_request().url, "https://api.test/course/list?status=ACTIVE");
}

#[test]
fn course_lifecycle_actions_use_verb_paths() {
    let transport = MockTransport::new();
    for _ in 0..4 {
        transport.push_ok(json!(null));
    }
    let client = client_with_token(&transport, Some("t"));

    block_on(activate_course(&client, "1")).unwrap();
    block_on(deactivate_course(&client, "1")).unwrap();
    block_on(archive_course(&client, "1")).unwrap();
    block_on(delete_course(&client, "1")).unwrap();

    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec![
        "https://api.test/course/1/activate".to_owned(),
        "https://api.test/course/1/deactivate".to_owned(),
        "https://api.test/course/1/archive".to_owned(),
        "https://api.test/course/1/delete".to_owned(),
    ]);
}

#[test]
fn department_crud_round() {
    let transport = MockTransport::new();
    transport.push_ok(json!({ "id": 10, "name": "Physics", "code": "PHY" }));
    transport.push_ok(json!(null));
    transport.push_ok(json!([{ "id": 10, "name": "Physics", "enabled": false }]));
    let client = client_with_token(&transport, Some("t"));

    let payload = DepartmentPayload { code: "PHY".to_owned(), name: "Physics".to_owned(), description: String::new() };
    let created = block_on(create_department(&client, &payload)).unwrap();
    block_on(disable_department(&client, &created.id)).unwrap();
    let listed = block_on(list_departments(&client, &DepartmentQuery::default())).unwrap();

    assert_eq!(created.id, "10");
    assert_eq!(listed.len(), 1);
    assert!(!listed[0].enabled);
    assert_eq!(transport.requests()[1].url, "https://api.test/department/10/disable");
}
