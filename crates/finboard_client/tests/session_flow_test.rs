//! End-to-end session lifecycle: credential exchange, bootstrap
//! revalidation, and failure recovery across the whole pipeline.


use std::time::Duration;

use finboard_client::session::SessionRecord;
use finboard_client::{NoticeKind, SessionStatus, SessionStorage, SESSION_EXPIRED_NOTICE};
use serde_json::json;
use test_utils::*;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_commits_session_and_authenticates_following_calls() {
    let server = MockServer::start().await;
    let harness = Harness::against(&server.uri());
    let user = sample_user("sam@example.com");

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "sam@example.com",
            "password": "hunter2"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(login_envelope(&user, "fresh-token")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(header("Authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let returned = harness
        .client
        .login("sam@example.com", "hunter2")
        .await
        .expect("login");
    assert_eq!(returned.id, user.id);
    assert_eq!(harness.session.status(), SessionStatus::Confirmed);
    assert_eq!(harness.session.token().as_deref(), Some("fresh-token"));

    harness.client.accounts().await.expect("accounts");
}

#[tokio::test]
async fn bootstrap_without_persisted_token_makes_no_network_call() {
    let server = MockServer::start().await;
    let harness = Harness::against(&server.uri());

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    harness.client.bootstrap().await;

    assert_eq!(harness.session.status(), SessionStatus::Anonymous);
    assert!(!harness.session.is_loading());
    assert!(harness.notifier.notices().is_empty());
}

#[tokio::test]
async fn bootstrap_revalidates_persisted_token_and_confirms() {
    let server = MockServer::start().await;
    let harness = Harness::against(&server.uri());
    let user = sample_user("sam@example.com");

    SessionStorage::new(harness.session_path()).save(&SessionRecord {
        user: Some(user.clone()),
        token: Some("tok-persisted".to_string()),
    });

    // The restored token is provisionally trusted and already rides on the
    // revalidation call itself.
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("Authorization", "Bearer tok-persisted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(user_json(&user))))
        .expect(1)
        .mount(&server)
        .await;

    harness.client.bootstrap().await;

    assert_eq!(harness.session.status(), SessionStatus::Confirmed);
    assert_eq!(harness.session.token().as_deref(), Some("tok-persisted"));
    assert_eq!(harness.session.user().expect("user").id, user.id);
    assert!(harness.notifier.notices().is_empty());
}

#[tokio::test]
async fn bootstrap_with_rejected_token_signs_out_with_a_single_notice() {
    let server = MockServer::start().await;
    let harness = Harness::against(&server.uri());

    SessionStorage::new(harness.session_path()).save(&SessionRecord {
        user: Some(sample_user("sam@example.com")),
        token: Some("tok-expired".to_string()),
    });

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    harness.client.bootstrap().await;

    assert_eq!(harness.session.status(), SessionStatus::Anonymous);
    assert!(harness.session.user().is_none());
    assert!(harness.session.token().is_none());
    assert!(!harness.session.is_loading());

    let notices = harness.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].0, NoticeKind::Warning);
    assert_eq!(notices[0].1, SESSION_EXPIRED_NOTICE);

    // The 401 stage also ran: back to the login view, record cleared.
    assert!(harness.navigator.redirects() >= 1);
    let record = SessionStorage::new(harness.session_path())
        .load()
        .expect("record");
    assert!(record.token.is_none());
}

#[tokio::test]
async fn concurrent_unauthorized_responses_settle_idempotently() {
    let server = MockServer::start().await;
    let harness = Harness::against(&server.uri());
    harness.sign_in("sam@example.com", "tok-stale");

    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/budgets"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (accounts, budgets) =
        tokio::join!(harness.client.accounts(), harness.client.budgets("2026-03"));

    assert!(accounts.is_err());
    assert!(budgets.is_err());
    assert_eq!(harness.session.status(), SessionStatus::Anonymous);
    assert!(harness.session.token().is_none());
    assert!(harness.navigator.redirects() >= 1);
    assert!(harness.notifier.notices().is_empty());
}

#[tokio::test]
async fn in_flight_success_still_resolves_after_sign_out() {
    let server = MockServer::start().await;
    let harness = Harness::against(&server.uri());
    harness.sign_in("sam@example.com", "tok-abc");

    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([account_json("Checking", 1000)])))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let call = harness.client.accounts();
    let sign_out = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        harness.session.sign_out(None);
    };
    let (result, ()) = tokio::join!(call, sign_out);

    // Classification consults the response's own status, not the
    // since-cleared session: the stale payload is still delivered.
    let accounts = result.expect("stale success");
    assert_eq!(accounts.len(), 1);
    assert!(!harness.session.is_authenticated());
}
