mod common;

use axum::http::StatusCode;
use common::{body_json, current_roll, post_json, registration_config, setup_test_app};
use serde_json::json;
use tower::ServiceExt;

const REQUESTS: &str = "/api/students/password-change-requests";

#[tokio::test]
async fn test_request_flags_matching_student() {
    let app = setup_test_app(registration_config());
    let roll = current_roll(200);
    let id = app.students.insert(&roll, "asha@nitp.ac.in");

    let response = app
        .router
        .oneshot(post_json(
            REQUESTS,
            &json!({ "institutionalEmail": "asha@nitp.ac.in", "roll": roll }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "message": "Password change request submitted successfully" })
    );
    assert!(app.students.get(id).unwrap().password_change_requested);
}

#[tokio::test]
async fn test_request_is_idempotent() {
    let app = setup_test_app(registration_config());
    let roll = current_roll(201);
    let id = app.students.insert(&roll, "asha@nitp.ac.in");
    let body = json!({ "institutionalEmail": "asha@nitp.ac.in", "roll": roll });

    for _ in 0..2 {
        let response = app
            .router
            .clone()
            .oneshot(post_json(REQUESTS, &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert!(app.students.get(id).unwrap().password_change_requested);
}

#[tokio::test]
async fn test_email_match_ignores_case() {
    let app = setup_test_app(registration_config());
    let roll = current_roll(202);
    app.students.insert(&roll, "asha@nitp.ac.in");

    let response = app
        .router
        .oneshot(post_json(
            REQUESTS,
            &json!({ "institutionalEmail": "Asha@NITP.ac.in", "roll": roll }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_email_and_unknown_roll_look_the_same() {
    let app = setup_test_app(registration_config());
    let roll = current_roll(203);
    let id = app.students.insert(&roll, "asha@nitp.ac.in");

    let wrong_email = app
        .router
        .clone()
        .oneshot(post_json(
            REQUESTS,
            &json!({ "institutionalEmail": "ravi@nitp.ac.in", "roll": roll }),
        ))
        .await
        .unwrap();
    let unknown_roll = app
        .router
        .oneshot(post_json(
            REQUESTS,
            &json!({ "institutionalEmail": "asha@nitp.ac.in", "roll": current_roll(204) }),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_email.status(), StatusCode::NOT_FOUND);
    assert_eq!(unknown_roll.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(wrong_email).await, body_json(unknown_roll).await);
    assert!(!app.students.get(id).unwrap().password_change_requested);
}

#[tokio::test]
async fn test_missing_identifiers_are_invalid_input() {
    let app = setup_test_app(registration_config());

    let response = app
        .router
        .clone()
        .oneshot(post_json(REQUESTS, &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "invalid_input");
    assert_eq!(
        body["messages"],
        json!(["institutionalEmail is required", "roll is required"])
    );

    let response = app
        .router
        .oneshot(post_json(
            REQUESTS,
            &json!({ "institutionalEmail": "asha@nitp.ac.in", "roll": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["messages"], json!(["roll is required"]));
}

#[tokio::test]
async fn test_update_failure_is_persistence_error() {
    let app = setup_test_app(registration_config());
    let roll = current_roll(205);
    app.students.insert(&roll, "asha@nitp.ac.in");
    app.students.fail_writes();

    let response = app
        .router
        .oneshot(post_json(
            REQUESTS,
            &json!({ "institutionalEmail": "asha@nitp.ac.in", "roll": roll }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "persistence_error");
    assert_eq!(body["error"], "Failed to save the request");
}
