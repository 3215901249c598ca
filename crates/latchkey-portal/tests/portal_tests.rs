// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Portal sign-in against a mock portal.

use std::sync::Arc;
use std::time::Duration;

use latchkey_auth::{CredentialChallengeHandler, UiContext};
use latchkey_core::{ChallengeKind, LoadStatus, Loadable};
use latchkey_portal::{LoadError, Portal, describe_outcome};
use latchkey_test_utils::{RecordedChallenge, ScriptedHandler, ScriptedPrompt};
use serde_json::json;
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SELF_PATH: &str = "/gis/sharing/rest/portals/self";

fn portal_body(username: Option<&str>) -> serde_json::Value {
    let mut body = json!({
        "id": "0123456789ABCDEF",
        "name": "GIS",
        "portalName": "ArcGIS Enterprise"
    });
    if let Some(username) = username {
        body["user"] = json!({"username": username, "fullName": "Test User"});
    }
    body
}

/// Accepts alice/secret, rejects everything else with 401.
async fn iwa_portal() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SELF_PATH))
        .and(query_param("f", "json"))
        .and(basic_auth("alice", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(portal_body(Some("alice"))))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(SELF_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    server
}

fn portal_url(server: &MockServer) -> String {
    format!("{}/gis", server.uri())
}

fn interactive(prompt: &Arc<ScriptedPrompt>, max_attempts: u32) -> Arc<CredentialChallengeHandler> {
    let ui = UiContext::spawn("latchkey-ui").unwrap();
    Arc::new(CredentialChallengeHandler::new(prompt.clone(), ui).with_max_attempts(max_attempts))
}

#[tokio::test]
async fn correct_credential_loads_portal() {
    let server = iwa_portal().await;
    let portal = Arc::new(Portal::new(&portal_url(&server), true).unwrap());
    let prompt = Arc::new(ScriptedPrompt::new().then_submit("alice", "secret"));

    let result = portal.load(interactive(&prompt, 5)).await;

    let info = result.as_ref().expect("portal should load");
    assert_eq!(info.user.as_ref().unwrap().username, "alice");
    assert_eq!(describe_outcome(&result), "Portal is loaded!");
    assert_eq!(portal.load_status(), LoadStatus::Loaded);
    assert_eq!(prompt.requests().len(), 1);
    assert_eq!(prompt.requests()[0].failure_count, 0);
}

#[tokio::test]
async fn wrong_credential_is_retried_with_higher_failure_count() {
    let server = iwa_portal().await;
    let url = portal_url(&server);
    let portal = Arc::new(Portal::new(&url, true).unwrap());
    let prompt = Arc::new(
        ScriptedPrompt::new()
            .then_submit("alice", "typo")
            .then_submit("alice", "secret"),
    );

    let result = portal.load(interactive(&prompt, 5)).await;

    assert!(result.is_ok());
    let requests = prompt.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].message, format!("Credential is required to access {url}"));
    assert_eq!(requests[1].message, format!("Wrong credential was passed to {url}"));
    assert_eq!(requests[1].failure_count, 1);
}

#[tokio::test]
async fn attempt_limit_fails_load_with_last_rejection() {
    let server = iwa_portal().await;
    let portal = Arc::new(Portal::new(&portal_url(&server), true).unwrap());
    let prompt = Arc::new(
        ScriptedPrompt::new()
            .then_submit("alice", "a")
            .then_submit("alice", "b")
            .then_submit("alice", "c")
            .then_submit("alice", "secret"),
    );

    let result = portal.load(interactive(&prompt, 2)).await;

    match &result {
        Err(LoadError::AuthenticationFailed { attempts, .. }) => assert_eq!(*attempts, 3),
        other => panic!("expected AuthenticationFailed, got {other:?}"),
    }
    assert!(describe_outcome(&result).starts_with("Portal sign in failed: "));
    // Forms for failure counts 0, 1 and 2; count 3 is over the limit.
    assert_eq!(prompt.requests().len(), 3);
    assert_eq!(
        prompt.notices(),
        vec!["Exceeded maximum amount of attempts. Please try again!".to_string()]
    );
    assert_eq!(portal.load_status(), LoadStatus::FailedToLoad);
}

#[tokio::test]
async fn user_cancel_fails_load_as_cancelled() {
    let server = iwa_portal().await;
    let portal = Arc::new(Portal::new(&portal_url(&server), true).unwrap());
    let prompt = Arc::new(ScriptedPrompt::new().then_submit("alice", "typo").then_cancel());

    let result = portal.load(interactive(&prompt, 5)).await;

    assert!(matches!(result, Err(LoadError::Cancelled)));
    assert_eq!(
        describe_outcome(&result),
        "Portal sign in was cancelled by user!"
    );
    assert_eq!(portal.load_status(), LoadStatus::FailedToLoad);
}

#[tokio::test]
async fn anonymous_access_needs_no_challenge() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SELF_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(portal_body(None)))
        .mount(&server)
        .await;

    let portal = Arc::new(Portal::new(&portal_url(&server), false).unwrap());
    let handler = Arc::new(ScriptedHandler::new());

    let info = portal.load(handler.clone()).await.unwrap();

    assert!(info.user.is_none());
    assert!(handler.challenges().is_empty());
}

#[tokio::test]
async fn rejected_anonymous_access_raises_first_challenge() {
    let server = iwa_portal().await;
    let url = portal_url(&server);
    let portal = Arc::new(Portal::new(&url, false).unwrap());
    let handler = Arc::new(ScriptedHandler::new().then_credential("alice", "secret"));

    portal.load(handler.clone()).await.unwrap();

    assert_eq!(
        handler.challenges(),
        vec![RecordedChallenge {
            kind: ChallengeKind::UserCredential,
            uri: url,
            failure_count: 0,
        }]
    );
}

#[tokio::test]
async fn cancel_without_attempts_is_authentication_required() {
    let server = iwa_portal().await;
    let portal = Arc::new(Portal::new(&portal_url(&server), true).unwrap());
    let handler = Arc::new(ScriptedHandler::new().then_cancel());

    let result = portal.load(handler).await;

    assert!(matches!(result, Err(LoadError::AuthenticationRequired)));
}

#[tokio::test]
async fn service_error_document_fails_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SELF_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"code": 400, "message": "Unable to load portal."}
        })))
        .mount(&server)
        .await;

    let portal = Arc::new(Portal::new(&portal_url(&server), true).unwrap());
    let handler = Arc::new(ScriptedHandler::new().then_credential("alice", "secret"));

    let result = portal.load(handler).await;

    assert!(matches!(result, Err(LoadError::Service { code: 400, .. })));
    assert_eq!(
        describe_outcome(&result),
        "Portal sign in failed: portal error 400: Unable to load portal."
    );
}

#[tokio::test]
async fn server_error_fails_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SELF_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let portal = Arc::new(Portal::new(&portal_url(&server), false).unwrap());
    let result = portal.load(Arc::new(ScriptedHandler::new())).await;

    assert!(matches!(result, Err(LoadError::Http { status: 503 })));
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_load_aborts_in_flight_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SELF_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(portal_body(Some("alice")))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let portal = Arc::new(Portal::new(&portal_url(&server), true).unwrap());
    let handler = Arc::new(ScriptedHandler::new().then_credential("alice", "secret"));

    let loading = {
        let portal = Arc::clone(&portal);
        tokio::spawn(async move { portal.load(handler).await })
    };

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(portal.load_status(), LoadStatus::Loading);
    portal.cancel_load();

    let result = tokio::time::timeout(Duration::from_secs(5), loading)
        .await
        .expect("cancel should end the load promptly")
        .unwrap();
    assert!(matches!(result, Err(LoadError::Cancelled)));
    assert_eq!(portal.load_status(), LoadStatus::FailedToLoad);
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_from_status_watcher_is_not_lost() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SELF_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(portal_body(Some("alice")))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let portal = Arc::new(Portal::new(&portal_url(&server), true).unwrap());
    let handler = Arc::new(ScriptedHandler::new().then_credential("alice", "secret"));

    let mut status = portal.subscribe();
    let watcher = {
        let portal = Arc::clone(&portal);
        tokio::spawn(async move {
            status
                .wait_for(|status| *status == LoadStatus::Loading)
                .await
                .unwrap();
            portal.cancel_load();
        })
    };

    let result = tokio::time::timeout(Duration::from_secs(5), portal.load(handler))
        .await
        .expect("cancel from the watcher should end the load");
    watcher.await.unwrap();

    assert!(matches!(result, Err(LoadError::Cancelled)));
    assert_eq!(portal.load_status(), LoadStatus::FailedToLoad);
}

#[test]
fn malformed_url_fails_at_construction() {
    for url in ["https://exa mple.com/gis", "https://:443/gis", "http://[::1/gis"] {
        assert!(Portal::new(url, true).is_err(), "{url} should be rejected");
    }
}

#[tokio::test]
async fn loaded_portal_is_not_reloaded() {
    let server = iwa_portal().await;
    let portal = Arc::new(Portal::new(&portal_url(&server), true).unwrap());
    let handler = Arc::new(ScriptedHandler::new().then_credential("alice", "secret"));

    portal.load(handler.clone()).await.unwrap();
    portal.load(handler.clone()).await.unwrap();

    assert_eq!(handler.challenges().len(), 1);
}

#[tokio::test]
async fn failed_load_can_be_retried() {
    let server = iwa_portal().await;
    let portal = Arc::new(Portal::new(&portal_url(&server), true).unwrap());
    let handler = Arc::new(
        ScriptedHandler::new()
            .then_user_cancel()
            .then_credential("alice", "secret"),
    );

    assert!(matches!(
        portal.load(handler.clone()).await,
        Err(LoadError::Cancelled)
    ));
    assert!(portal.load(handler.clone()).await.is_ok());
    assert_eq!(portal.load_status(), LoadStatus::Loaded);
}

#[tokio::test]
async fn status_changes_are_observable() {
    let server = iwa_portal().await;
    let portal = Arc::new(Portal::new(&portal_url(&server), true).unwrap());
    let mut status = portal.subscribe();
    assert_eq!(*status.borrow(), LoadStatus::NotLoaded);

    let handler = Arc::new(ScriptedHandler::new().then_credential("alice", "secret"));
    portal.load(handler).await.unwrap();

    assert!(status.has_changed().unwrap());
    assert_eq!(*status.borrow_and_update(), LoadStatus::Loaded);
}
