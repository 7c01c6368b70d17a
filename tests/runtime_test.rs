//! End-to-end flows of the order page: the runtime, a mock backend, and a
//! scripted payment provider.

mod common;

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_order::api::ApiClient;
use storefront_order::checkout::ScriptStatus;
use storefront_order::models::Session;
use storefront_order::tui::app::ToastLevel;
use storefront_order::tui::{App, AppContext, Event, Message, Route, Runtime, ViewAction};

use common::{FakeButtons, ORDER_ID, ORDER_JSON, ORDER_PAID_JSON, TOKEN, USER_JSON, pump};

fn key(code: KeyCode) -> Message {
    Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

fn json_body(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap()
}

fn context(server: &MockServer, buttons: Arc<FakeButtons>) -> AppContext<FakeButtons> {
    AppContext {
        api: ApiClient::with_client(server.uri(), reqwest::Client::new()),
        buttons,
        persist_session: false,
    }
}

async fn mount_key(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/keys/paypal"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("sb-client-id"))
        .mount(server)
        .await;
}

async fn mount_order(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/orders/{ORDER_ID}")))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json_body(body)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_anonymous_session_redirects_to_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let (mut runtime, _rx) = Runtime::new(context(&server, Arc::default()));
    let mut app = App::new(ORDER_ID, Session::anonymous());

    runtime.sync_effects(&mut app);

    assert_eq!(app.route, Route::Login);
    assert_eq!(app.fetch_generation, 0);
    assert_eq!(runtime.pending_tasks(), 0);
}

#[tokio::test]
async fn test_fetch_then_load_buttons() {
    let server = MockServer::start().await;
    mount_order(&server, ORDER_JSON).await;
    mount_key(&server).await;

    let buttons = Arc::new(FakeButtons::default());
    let (mut runtime, mut rx) = Runtime::new(context(&server, Arc::clone(&buttons)));
    let mut app = App::new(ORDER_ID, Session::signed_in(common::user()));
    assert!(app.view.loading);

    pump(&mut runtime, &mut app, &mut rx, |app| {
        app.script.status == ScriptStatus::Resolved
    })
    .await;

    assert!(!app.view.loading);
    assert_eq!(app.view.error, None);
    let order = app.view.order.as_ref().unwrap();
    assert_eq!(order.id, ORDER_ID);
    assert!(!order.is_paid);

    let loaded = buttons.loaded.lock().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].client_id, "sb-client-id");
    assert_eq!(loaded[0].currency, "USD");
    assert_eq!(app.title(), format!("Order {ORDER_ID}"));
}

#[tokio::test]
async fn test_fetch_failure_shows_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/orders/{ORDER_ID}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Order Not Found"})))
        .mount(&server)
        .await;

    let (mut runtime, mut rx) = Runtime::new(context(&server, Arc::default()));
    let mut app = App::new(ORDER_ID, Session::signed_in(common::user()));

    pump(&mut runtime, &mut app, &mut rx, |app| !app.view.loading).await;

    assert_eq!(app.view.error.as_deref(), Some("Order Not Found"));
    assert!(app.view.order.is_none());
    assert_eq!(app.script.status, ScriptStatus::Initial);
    assert_eq!(app.title(), "Order Not Found");
}

#[tokio::test]
async fn test_rejected_buttons_do_not_block_the_page() {
    let server = MockServer::start().await;
    mount_order(&server, ORDER_JSON).await;
    mount_key(&server).await;

    let buttons = Arc::new(FakeButtons {
        load_error: Some("PAYPAL_CLIENT_SECRET is not configured".to_string()),
        ..Default::default()
    });
    let (mut runtime, mut rx) = Runtime::new(context(&server, buttons));
    let mut app = App::new(ORDER_ID, Session::signed_in(common::user()));

    pump(&mut runtime, &mut app, &mut rx, |app| {
        matches!(app.script.status, ScriptStatus::Rejected(_))
    })
    .await;

    assert!(app.view.order.is_some());
    assert_eq!(app.view.error, None);
    assert_eq!(app.toast.as_ref().map(|t| t.level), Some(ToastLevel::Error));

    // Pay stays disabled until the buttons load.
    runtime.process(&mut app, key(KeyCode::Char('p')));
    assert!(!app.checkout.creating);
}

#[tokio::test]
async fn test_payment_marks_order_paid_and_refetches() {
    let server = MockServer::start().await;
    // First fetch: unpaid; every later fetch: paid.
    Mock::given(method("GET"))
        .and(path(format!("/api/orders/{ORDER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json_body(ORDER_JSON)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_order(&server, ORDER_PAID_JSON).await;
    mount_key(&server).await;
    Mock::given(method("PUT"))
        .and(path(format!("/api/orders/{ORDER_ID}/pay")))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .and(body_partial_json(json!({
            "id": "5O190127TN364715T",
            "status": "COMPLETED",
            "update_time": "2024-03-01T10:05:00Z",
            "payer": {"email_address": "buyer@example.com"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Order Paid",
            "order": json_body(ORDER_PAID_JSON),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let buttons = Arc::new(FakeButtons::default());
    let (mut runtime, mut rx) = Runtime::new(context(&server, Arc::clone(&buttons)));
    let mut app = App::new(ORDER_ID, Session::signed_in(common::user()));

    pump(&mut runtime, &mut app, &mut rx, |app| {
        app.script.status == ScriptStatus::Resolved
    })
    .await;

    runtime.process(&mut app, key(KeyCode::Char('p')));
    assert!(app.checkout.creating);
    pump(&mut runtime, &mut app, &mut rx, |app| app.checkout.pending.is_some()).await;
    assert!(!app.checkout.creating);
    assert_eq!(
        buttons.created.lock().unwrap()[0].amount(),
        Some("300.02")
    );

    runtime.process(&mut app, key(KeyCode::Char('a')));
    // A second press while the capture is in flight is ignored.
    runtime.process(&mut app, key(KeyCode::Char('a')));
    pump(&mut runtime, &mut app, &mut rx, |app| {
        app.fetch_generation == 2 && !app.view.loading && app.checkout.pending.is_none()
    })
    .await;

    assert_eq!(
        *buttons.captured.lock().unwrap(),
        vec!["5O190127TN364715T".to_string()]
    );
    let order = app.view.order.as_ref().unwrap();
    assert!(order.is_paid);
    assert!(!app.view.success_pay);
    assert!(!app.view.loading_pay);
    assert!(!app.checkout.capturing);
    assert_eq!(app.view.error_pay, None);
    let toast = app.toast.as_ref().unwrap();
    assert_eq!(toast.level, ToastLevel::Success);
    assert_eq!(toast.message, "Order is paid");
}

#[tokio::test]
async fn test_capture_failure_skips_backend() {
    let server = MockServer::start().await;
    mount_order(&server, ORDER_JSON).await;
    mount_key(&server).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let buttons = Arc::new(FakeButtons {
        capture_error: Some("INSTRUMENT_DECLINED".to_string()),
        ..Default::default()
    });
    let (mut runtime, mut rx) = Runtime::new(context(&server, buttons));
    let mut app = App::new(ORDER_ID, Session::signed_in(common::user()));

    pump(&mut runtime, &mut app, &mut rx, |app| {
        app.script.status == ScriptStatus::Resolved
    })
    .await;
    runtime.process(&mut app, key(KeyCode::Char('p')));
    pump(&mut runtime, &mut app, &mut rx, |app| app.checkout.pending.is_some()).await;

    runtime.process(&mut app, key(KeyCode::Char('a')));
    pump(&mut runtime, &mut app, &mut rx, |app| app.toast.is_some()).await;

    let toast = app.toast.as_ref().unwrap();
    assert_eq!(toast.level, ToastLevel::Error);
    assert!(toast.message.contains("INSTRUMENT_DECLINED"));
    assert!(!app.view.loading_pay);
    assert!(!app.view.order.as_ref().unwrap().is_paid);
}

#[tokio::test]
async fn test_backend_rejection_sets_payment_error() {
    let server = MockServer::start().await;
    mount_order(&server, ORDER_JSON).await;
    mount_key(&server).await;
    Mock::given(method("PUT"))
        .and(path(format!("/api/orders/{ORDER_ID}/pay")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Order Not Found"})))
        .mount(&server)
        .await;

    let (mut runtime, mut rx) = Runtime::new(context(&server, Arc::default()));
    let mut app = App::new(ORDER_ID, Session::signed_in(common::user()));

    pump(&mut runtime, &mut app, &mut rx, |app| {
        app.script.status == ScriptStatus::Resolved
    })
    .await;
    runtime.process(&mut app, key(KeyCode::Char('p')));
    pump(&mut runtime, &mut app, &mut rx, |app| app.checkout.pending.is_some()).await;
    runtime.process(&mut app, key(KeyCode::Char('a')));
    pump(&mut runtime, &mut app, &mut rx, |app| app.view.error_pay.is_some()).await;

    assert_eq!(app.view.error_pay.as_deref(), Some("Order Not Found"));
    assert!(!app.view.loading_pay);
    assert!(!app.view.success_pay);
    assert_eq!(app.fetch_generation, 1);
}

#[tokio::test]
async fn test_sign_in_returns_to_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/signin"))
        .and(body_partial_json(json!({"email": "ada@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json_body(USER_JSON)))
        .expect(1)
        .mount(&server)
        .await;
    mount_order(&server, ORDER_JSON).await;
    mount_key(&server).await;

    let (mut runtime, mut rx) = Runtime::new(context(&server, Arc::default()));
    let mut app = App::new(ORDER_ID, Session::anonymous());
    runtime.sync_effects(&mut app);
    assert_eq!(app.route, Route::Login);

    for c in "ada@example.com".chars() {
        runtime.process(&mut app, key(KeyCode::Char(c)));
    }
    runtime.process(&mut app, key(KeyCode::Tab));
    for c in "secret".chars() {
        runtime.process(&mut app, key(KeyCode::Char(c)));
    }
    runtime.process(&mut app, key(KeyCode::Enter));
    assert!(app.login.submitting);

    pump(&mut runtime, &mut app, &mut rx, |app| {
        app.view.order.is_some() && app.script.status == ScriptStatus::Resolved
    })
    .await;

    assert_eq!(app.route, Route::Order(ORDER_ID.to_string()));
    assert!(app.session.is_signed_in());
    assert!(app.login.password.is_empty());
}

#[tokio::test]
async fn test_superseded_fetch_result_is_dropped() {
    let server = MockServer::start().await;
    let (mut runtime, _rx) = Runtime::new(context(&server, Arc::default()));
    let mut app = App::new(ORDER_ID, Session::signed_in(common::user()));

    let stale = app.begin_fetch();
    let _current = app.begin_fetch();
    runtime.process(
        &mut app,
        Message::OrderFetched {
            generation: stale,
            result: Err("Order Not Found".to_string()),
        },
    );

    assert!(app.view.loading);
    assert_eq!(app.view.error, None);

    runtime.process(&mut app, Message::View(ViewAction::FetchSuccess(common::order())));
    assert!(!app.view.loading);
}
