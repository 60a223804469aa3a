//! Session gating and the full new bill flow through the router.

mod helpers;

use billed_core::constants::USER_SESSION_KEY;
use billed_core::validation::RECEIPT_FORMAT_MESSAGE;
use billed_storage::memory::Operation;
use billed_storage::{KeyValueStore, MemoryBillsGateway};
use billed_web::{Navigator, NewBillForm, Route};
use helpers::fixtures::{receipt, unordered_bills};
use helpers::{TestApp, EMPLOYEE_EMAIL};

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = TestApp::signed_out(MemoryBillsGateway::with_bills(unordered_bills()));

    for route in [Route::Bills, Route::NewBill] {
        app.router.navigate(route);
        app.router.settle().await;
        assert_eq!(app.router.location(), Route::Login);
        assert!(app.document().find_by_test_id("form-employee").is_some());
    }

    assert!(app.router.new_bill_controller().is_none());
    assert_eq!(app.gateway.calls(Operation::List), 0);
}

#[tokio::test]
async fn test_corrupt_session_counts_as_signed_out() {
    let app = TestApp::signed_out(MemoryBillsGateway::new());
    app.kv.set_item(USER_SESSION_KEY, "{not json").unwrap();

    app.router.navigate(Route::Bills);
    assert_eq!(app.router.location(), Route::Login);
}

#[tokio::test]
async fn test_logout_returns_to_login() {
    let app = TestApp::signed_in(MemoryBillsGateway::new());
    app.router.navigate(Route::NewBill);
    assert_eq!(app.router.location(), Route::NewBill);

    app.sessions.logout().unwrap();
    app.router.navigate(Route::NewBill);
    assert_eq!(app.router.location(), Route::Login);
}

#[tokio::test]
async fn test_new_bill_flow() {
    let app = TestApp::signed_in(MemoryBillsGateway::new());

    app.router.navigate(Route::Bills);
    app.router.settle().await;
    app.router.bills_container().unwrap().handle_click_new_bill();
    assert_eq!(app.router.location(), Route::NewBill);
    assert_eq!(Route::NewBill.path(), "#employee/bill/new");

    let controller = app.router.new_bill_controller().unwrap();

    assert!(controller
        .on_file_change(vec![receipt("facture.pdf", "application/pdf")])
        .is_err());
    assert_eq!(app.notifier.messages(), vec![RECEIPT_FORMAT_MESSAGE]);

    controller
        .on_file_change(vec![receipt("facture.png", "image/png")])
        .unwrap()
        .unwrap()
        .await
        .unwrap();

    let write = controller
        .on_submit(NewBillForm {
            expense_type: "Transports".to_string(),
            expense_name: "Vol Paris Londres".to_string(),
            datepicker: "2023-04-04".to_string(),
            amount: "348".to_string(),
            vat: "70".to_string(),
            pct: "20".to_string(),
            commentary: String::new(),
        })
        .unwrap();

    // Already on the bills page, write or not
    assert_eq!(app.router.location(), Route::Bills);
    write.await.unwrap();
    app.router.settle().await;

    app.router.navigate(Route::Bills);
    app.router.settle().await;
    assert_eq!(
        app.document().texts_by_test_id("bill-date"),
        vec!["2023-04-04"]
    );
    assert_eq!(app.gateway.bills()[0].email, EMPLOYEE_EMAIL);
    assert!(app.error_sink.reports().is_empty());
}

#[tokio::test]
async fn test_file_session_survives_restart() {
    use billed_core::models::Session;
    use billed_storage::{FileKeyValueStore, SessionStore};
    use billed_web::{Document, Router};
    use std::sync::Arc;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    SessionStore::new(Arc::new(FileKeyValueStore::new(&path)))
        .login(&Session::employee(EMPLOYEE_EMAIL))
        .unwrap();

    let gateway = MemoryBillsGateway::with_bills(unordered_bills());
    let router = Router::builder(
        Document::new(),
        SessionStore::new(Arc::new(FileKeyValueStore::new(&path))),
        Arc::new(gateway),
    )
    .build();

    router.navigate(Route::Bills);
    router.settle().await;
    assert_eq!(router.location(), Route::Bills);
    assert_eq!(router.session().unwrap().email, EMPLOYEE_EMAIL);
    assert_eq!(router.document().texts_by_test_id("bill-date").len(), 3);
}
