//! HTTP API integration tests.
//!
//! Drives the assembled axum router with `tower::ServiceExt::oneshot`
//! over in-memory repositories and the mock gateway.

mod common;

use std::time::Duration;

use axum::http::{header, Method, StatusCode};
use serde_json::json;

use common::{TestApp, FRONTEND, KEY_ID};
use coursebundler::ports::{PaymentGatewayError, PaymentRepository};

// =============================================================================
// Public endpoints
// =============================================================================

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();

    let response = app.get("/api/v1/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn gateway_key_is_public_and_never_the_secret() {
    let app = TestApp::new();

    let response = app.get("/api/v1/razorpaykey", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["key"], KEY_ID);
    assert!(!response.body.to_string().contains(common::KEY_SECRET));
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn register_sets_cookie_and_hides_password() {
    let app = TestApp::new();

    let response = app
        .send(
            Method::POST,
            "/api/v1/register",
            None,
            Some(json!({"name": "Asha", "email": "asha@example.com", "password": "secret123"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.session_token().is_some());
    let cookie = response.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert_eq!(response.body["user"]["role"], "user");
    assert_eq!(response.body["user"]["subscription"]["status"], "none");
    assert!(response.body["user"].get("password_hash").is_none());
    assert!(app.bus.has_event("user.registered.v1"));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = TestApp::new();
    app.register("Asha", "asha@example.com").await;

    let response = app
        .send(
            Method::POST,
            "/api/v1/register",
            None,
            Some(json!({"name": "Other", "email": "ASHA@example.com", "password": "secret123"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error_code"], "CONFLICT");
}

#[tokio::test]
async fn register_with_missing_fields_is_rejected() {
    let app = TestApp::new();

    let response = app
        .send(
            Method::POST,
            "/api/v1/register",
            None,
            Some(json!({"email": "asha@example.com"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error_code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn login_uses_one_message_for_every_bad_credential() {
    let app = TestApp::new();
    app.register("Asha", "asha@example.com").await;

    let wrong_password = app
        .send(
            Method::POST,
            "/api/v1/login",
            None,
            Some(json!({"email": "asha@example.com", "password": "nope-nope"})),
        )
        .await;
    let unknown_email = app
        .send(
            Method::POST,
            "/api/v1/login",
            None,
            Some(json!({"email": "ghost@example.com", "password": "secret123"})),
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["message"], "Incorrect email or password");
    assert_eq!(wrong_password.body["message"], unknown_email.body["message"]);
}

#[tokio::test]
async fn login_then_profile_via_cookie() {
    let app = TestApp::new();
    app.register("Asha", "asha@example.com").await;

    let login = app
        .send(
            Method::POST,
            "/api/v1/login",
            None,
            Some(json!({"email": "asha@example.com", "password": "secret123"})),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["message"], "Welcome back, Asha");
    let token = login.session_token().unwrap();

    let request = axum::http::Request::builder()
        .uri("/api/v1/me")
        .header(header::COOKIE, format!("token={}", token))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

async fn login_status(app: &TestApp, email: &str, password: &str) -> StatusCode {
    app.send(
        Method::POST,
        "/api/v1/login",
        None,
        Some(json!({"email": email, "password": password})),
    )
    .await
    .status
}

#[tokio::test]
async fn change_password_swaps_login_credentials() {
    let app = TestApp::new();
    let token = app.register("Asha", "asha@example.com").await;

    let response = app
        .send(
            Method::PUT,
            "/api/v1/changepassword",
            Some(&token),
            Some(json!({"oldPassword": "secret123", "newPassword": "better456"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["message"], "Password changed successfully");
    assert_eq!(login_status(&app, "asha@example.com", "secret123").await, StatusCode::UNAUTHORIZED);
    assert_eq!(login_status(&app, "asha@example.com", "better456").await, StatusCode::OK);
}

#[tokio::test]
async fn change_password_rejects_wrong_old_password() {
    let app = TestApp::new();
    let token = app.register("Asha", "asha@example.com").await;

    let response = app
        .send(
            Method::PUT,
            "/api/v1/changepassword",
            Some(&token),
            Some(json!({"oldPassword": "not-mine", "newPassword": "better456"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Incorrect old password");
    assert_eq!(login_status(&app, "asha@example.com", "secret123").await, StatusCode::OK);
}

#[tokio::test]
async fn account_updates_require_a_session() {
    let app = TestApp::new();

    let password = app
        .send(
            Method::PUT,
            "/api/v1/changepassword",
            None,
            Some(json!({"oldPassword": "secret123", "newPassword": "better456"})),
        )
        .await;
    let profile = app
        .send(Method::PUT, "/api/v1/updateprofile", None, Some(json!({"name": "X"})))
        .await;

    assert_eq!(password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(profile.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_profile_changes_name_and_email() {
    let app = TestApp::new();
    let token = app.register("Asha", "asha@example.com").await;

    let response = app
        .send(
            Method::PUT,
            "/api/v1/updateprofile",
            Some(&token),
            Some(json!({"name": "Asha K", "email": "asha.k@example.com"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["user"]["name"], "Asha K");
    assert_eq!(response.body["user"]["email"], "asha.k@example.com");
    assert_eq!(login_status(&app, "asha.k@example.com", "secret123").await, StatusCode::OK);
    let me = app.get("/api/v1/me", Some(&token)).await;
    assert_eq!(me.body["user"]["name"], "Asha K");
}

#[tokio::test]
async fn update_profile_to_taken_email_is_a_conflict() {
    let app = TestApp::new();
    app.register("Bo", "bo@example.com").await;
    let token = app.register("Asha", "asha@example.com").await;

    let response = app
        .send(
            Method::PUT,
            "/api/v1/updateprofile",
            Some(&token),
            Some(json!({"email": "bo@example.com"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    let me = app.get("/api/v1/me", Some(&token)).await;
    assert_eq!(me.body["user"]["email"], "asha@example.com");
}

#[tokio::test]
async fn profile_requires_a_session() {
    let app = TestApp::new();

    let missing = app.get("/api/v1/me", None).await;
    let garbage = app.get("/api/v1/me", Some("not-a-jwt")).await;

    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error_code"], "UNAUTHENTICATED");
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn stale_cookie_does_not_block_public_routes() {
    let app = TestApp::new();

    let response = app.get("/api/v1/razorpaykey", Some("expired-or-garbage")).await;

    assert_eq!(response.status, StatusCode::OK);
    let cookie = response.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn login_over_stale_cookie_sets_fresh_session() {
    let app = TestApp::new();
    app.register("Asha", "asha@example.com").await;

    let response = app
        .send(
            Method::POST,
            "/api/v1/login",
            Some("expired-or-garbage"),
            Some(json!({"email": "asha@example.com", "password": "secret123"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.session_token().is_some());
}

#[tokio::test]
async fn valid_session_leaves_cookie_alone() {
    let app = TestApp::new();
    let token = app.register("Asha", "asha@example.com").await;

    let response = app.get("/api/v1/me", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.headers.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn logout_clears_cookie() {
    let app = TestApp::new();

    let response = app.send(Method::POST, "/api/v1/logout", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let cookie = response.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

// =============================================================================
// Subscription lifecycle
// =============================================================================

#[tokio::test]
async fn subscribe_verify_and_cancel_inside_refund_window() {
    let app = TestApp::new();
    app.gateway.push_subscription_id("sub_test_1");
    let token = app.register("Asha", "asha@example.com").await;

    let created = app.get("/api/v1/subscribe", Some(&token)).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["success"], true);
    assert_eq!(created.body["subscriptionId"], "sub_test_1");

    let locked = app.get("/api/v1/subscriber/ping", Some(&token)).await;
    assert_eq!(locked.status, StatusCode::FORBIDDEN);

    let verified = app
        .get(&app.verification_uri("pay_1", "sub_test_1", None), Some(&token))
        .await;
    assert_eq!(verified.status, StatusCode::SEE_OTHER);
    assert_eq!(
        verified.location(),
        Some(format!("{}/paymentsuccess?reference=pay_1", FRONTEND).as_str())
    );

    let unlocked = app.get("/api/v1/subscriber/ping", Some(&token)).await;
    assert_eq!(unlocked.status, StatusCode::OK);

    app.clock.advance_days(2);
    let cancelled = app
        .send(Method::DELETE, "/api/v1/subscribe/cancel", Some(&token), None)
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["refunded"], true);
    assert_eq!(
        cancelled.body["message"],
        "Subscription cancelled, You will receive full refund within 7 days."
    );
    assert!(app.gateway.was_called("cancel_subscription"));
    assert!(app.gateway.was_called("refund_payment"));
    assert!(app
        .repos
        .payments
        .find_by_subscription_id("sub_test_1")
        .await
        .unwrap()
        .is_none());

    let me = app.get("/api/v1/me", Some(&token)).await;
    assert_eq!(me.body["user"]["subscription"]["status"], "none");
}

#[tokio::test]
async fn cancel_after_window_does_not_refund() {
    let app = TestApp::new();
    let token = app.register("Asha", "asha@example.com").await;
    app.subscribe_and_pay(&token, "pay_1").await;

    app.clock.advance_days(8);
    let cancelled = app
        .send(Method::DELETE, "/api/v1/subscribe/cancel", Some(&token), None)
        .await;

    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["refunded"], false);
    assert!(!app.gateway.was_called("refund_payment"));
}

#[tokio::test]
async fn failed_refund_is_reported_but_subscription_ends() {
    let app = TestApp::new();
    let token = app.register("Asha", "asha@example.com").await;
    app.subscribe_and_pay(&token, "pay_1").await;
    app.gateway.set_method_error(
        "refund_payment",
        PaymentGatewayError::from_status(500, "refund down"),
    );

    let cancelled = app
        .send(Method::DELETE, "/api/v1/subscribe/cancel", Some(&token), None)
        .await;

    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["refunded"], false);
    assert_eq!(cancelled.body["refundFailed"], true);
    let ping = app.get("/api/v1/subscriber/ping", Some(&token)).await;
    assert_eq!(ping.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unpaid_checkout_can_be_cancelled() {
    let app = TestApp::new();
    let token = app.register("Asha", "asha@example.com").await;
    app.get("/api/v1/subscribe", Some(&token)).await;

    let cancelled = app
        .send(Method::DELETE, "/api/v1/subscribe/cancel", Some(&token), None)
        .await;

    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["message"], "Subscription cancelled.");
    let again = app.get("/api/v1/subscribe", Some(&token)).await;
    assert_eq!(again.status, StatusCode::CREATED);
}

#[tokio::test]
async fn tampered_signature_redirects_to_failure_and_activates_nothing() {
    let app = TestApp::new();
    let token = app.register("Asha", "asha@example.com").await;
    let created = app.get("/api/v1/subscribe", Some(&token)).await;
    let sub_id = created.body["subscriptionId"].as_str().unwrap().to_string();

    let response = app
        .get(
            &app.verification_uri("pay_1", &sub_id, Some("deadbeef")),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location(),
        Some(format!("{}/paymentfailed", FRONTEND).as_str())
    );
    let me = app.get("/api/v1/me", Some(&token)).await;
    assert_eq!(me.body["user"]["subscription"]["status"], "created");
}

#[tokio::test]
async fn second_subscribe_is_a_conflict() {
    let app = TestApp::new();
    let token = app.register("Asha", "asha@example.com").await;
    app.get("/api/v1/subscribe", Some(&token)).await;

    let again = app.get("/api/v1/subscribe", Some(&token)).await;

    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.body["error_code"], "ALREADY_SUBSCRIBED");
    assert_eq!(app.gateway.call_count("create_subscription"), 1);
}

#[tokio::test]
async fn admin_cannot_subscribe() {
    let app = TestApp::new();
    let token = app.register_admin("Root", "root@example.com").await;

    let response = app.get("/api/v1/subscribe", Some(&token)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error_code"], "FORBIDDEN_ROLE");
    assert!(!app.gateway.was_called("create_subscription"));
}

#[tokio::test]
async fn gateway_failure_maps_to_bad_gateway() {
    let app = TestApp::new();
    let token = app.register("Asha", "asha@example.com").await;
    app.gateway.set_method_error(
        "create_subscription",
        PaymentGatewayError::network("connection reset"),
    );

    let response = app.get("/api/v1/subscribe", Some(&token)).await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error_code"], "GATEWAY_ERROR");
}

#[tokio::test]
async fn slow_gateway_maps_to_gateway_timeout() {
    let app = TestApp::new();
    let token = app.register("Asha", "asha@example.com").await;
    app.gateway.set_delay(Duration::from_secs(2));

    let response = app.get("/api/v1/subscribe", Some(&token)).await;

    assert_eq!(response.status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(response.body["error_code"], "GATEWAY_TIMEOUT");
    let me = app.get("/api/v1/me", Some(&token)).await;
    assert_eq!(me.body["user"]["subscription"]["status"], "none");
}

#[tokio::test]
async fn cancel_without_subscription_is_rejected() {
    let app = TestApp::new();
    let token = app.register("Asha", "asha@example.com").await;

    let response = app
        .send(Method::DELETE, "/api/v1/subscribe/cancel", Some(&token), None)
        .await;

    assert!(response.status.is_client_error());
    assert!(!app.gateway.was_called("cancel_subscription"));
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn admin_routes_reject_plain_users() {
    let app = TestApp::new();
    let token = app.register("Asha", "asha@example.com").await;

    for uri in ["/api/v1/admin/users", "/api/v1/admin/stats"] {
        let response = app.get(uri, Some(&token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(response.body["error_code"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn admin_lists_and_toggles_users() {
    let app = TestApp::new();
    let admin = app.register_admin("Root", "root@example.com").await;
    app.register("Asha", "asha@example.com").await;

    let listed = app.get("/api/v1/admin/users", Some(&admin)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let users = listed.body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    let asha_id = users
        .iter()
        .find(|u| u["email"] == "asha@example.com")
        .and_then(|u| u["id"].as_str())
        .unwrap()
        .to_string();

    let toggled = app
        .send(
            Method::PUT,
            &format!("/api/v1/admin/users/{}", asha_id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(toggled.status, StatusCode::OK);
    assert_eq!(toggled.body["user"]["role"], "admin");

    let unknown = app
        .send(Method::PUT, "/api/v1/admin/users/not-a-uuid", Some(&admin), None)
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_delete_cancels_active_subscription() {
    let app = TestApp::new();
    let admin = app.register_admin("Root", "root@example.com").await;
    let token = app.register("Asha", "asha@example.com").await;
    let sub_id = app.subscribe_and_pay(&token, "pay_1").await;
    let me = app.get("/api/v1/me", Some(&token)).await;
    let asha_id = me.body["user"]["id"].as_str().unwrap().to_string();

    let deleted = app
        .send(
            Method::DELETE,
            &format!("/api/v1/admin/users/{}", asha_id),
            Some(&admin),
            None,
        )
        .await;

    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["refunded"], true);
    assert_eq!(
        app.gateway
            .calls()
            .iter()
            .find(|c| c.method == "cancel_subscription")
            .map(|c| c.arg.clone()),
        Some(sub_id)
    );
    let gone = app.get("/api/v1/me", Some(&token)).await;
    assert_eq!(gone.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dashboard_always_has_twelve_rows() {
    let app = TestApp::new();
    let admin = app.register_admin("Root", "root@example.com").await;
    let token = app.register("Asha", "asha@example.com").await;
    app.subscribe_and_pay(&token, "pay_1").await;

    let response = app.get("/api/v1/admin/stats", Some(&admin)).await;

    assert_eq!(response.status, StatusCode::OK);
    let rows = response.body["stats"].as_array().unwrap();
    assert_eq!(rows.len(), 12);
    assert!(rows[0]["created_at"].is_null());
    assert!(rows[11]["created_at"].is_string());
    assert_eq!(response.body["usersCount"], 2);
    assert_eq!(response.body["subscriptionCount"], 1);
}

#[tokio::test]
async fn delete_me_clears_cookie_and_account() {
    let app = TestApp::new();
    let token = app.register("Asha", "asha@example.com").await;

    let response = app.send(Method::DELETE, "/api/v1/me", Some(&token), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.headers[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));
    assert!(app.bus.has_event("user.deleted.v1"));
    let me = app.get("/api/v1/me", Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}
