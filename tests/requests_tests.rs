use actix_web::{http::StatusCode, test, web, App};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use leaveflow::domain::models::Request;
use leaveflow::handlers::shared::ApiResponse;

mod common;

use common::{days, TestContext};

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.service.clone()))
                .app_data(web::Data::new($ctx.balances.clone()))
                .app_data(web::Data::new($ctx.holidays.clone()))
                .configure(leaveflow::routes::configure),
        )
        .await
    };
}

fn leave_body(ctx: &TestContext) -> Value {
    json!({
        "employeeId": ctx.employee_id,
        "employeeName": "Jo Fielding",
        "kind": "leave",
        "leaveType": "vacation",
        "startDate": "2025-06-01",
        "endDate": "2025-06-07",
        "granularity": "full-day",
        "reason": "Summer break"
    })
}

fn decision_body(role: &str) -> Value {
    json!({
        "approverId": Uuid::new_v4(),
        "approverName": "Alex Kim",
        "role": role
    })
}

macro_rules! submit {
    ($app:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/requests")
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let envelope: ApiResponse<Request> = test::read_body_json(resp).await;
        envelope.data.expect("created request in response")
    }};
}

macro_rules! decide {
    ($app:expr, $request_id:expr, $action:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/requests/{}/{}", $request_id, $action))
            .set_json($body)
            .to_request();
        test::call_service(&$app, req).await
    }};
}

#[actix_web::test]
async fn test_submit_leave_request_calculates_chargeable_days() {
    // Arrange
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    // Act: 2025-06-01 (Sunday) through 2025-06-07 (Saturday), no holidays
    let request = submit!(app, &leave_body(&ctx));

    // Assert: the single Sunday is excluded
    assert_eq!(request.calculated_days, days("6.00"));
    assert_eq!(request.status.to_string(), "pending");
    assert_eq!(request.current_step.to_string(), "manager");
    assert!(request.manager_approval.is_none());
}

#[actix_web::test]
async fn test_submit_half_day_halves_the_charge() {
    // Arrange
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let mut body = leave_body(&ctx);
    body["granularity"] = json!("half-day-morning");

    // Act
    let request = submit!(app, &body);

    // Assert
    assert_eq!(request.calculated_days, days("3.00"));
}

#[actix_web::test]
async fn test_submit_rejects_range_with_no_chargeable_days() {
    // Arrange
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    // 2025-06-01 is a Sunday
    let mut body = leave_body(&ctx);
    body["endDate"] = json!("2025-06-01");

    // Act
    let req = test::TestRequest::post()
        .uri("/api/v1/requests")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_submit_insufficient_balance_reports_shortfall() {
    // Arrange: seeded personal balance is 2 days
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let mut body = leave_body(&ctx);
    body["leaveType"] = json!("personal");
    body["startDate"] = json!("2025-06-02");
    body["endDate"] = json!("2025-06-06");

    // Act: requesting 5 full days
    let req = test::TestRequest::post()
        .uri("/api/v1/requests")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let envelope: Value = test::read_body_json(resp).await;
    assert_eq!(envelope["success"], json!(false));
    assert_eq!(envelope["data"]["requested"], json!("5.00"));
    assert_eq!(envelope["data"]["remaining"], json!("2"));
}

#[actix_web::test]
async fn test_full_approval_chain_debits_balance_exactly_once() {
    // Arrange
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let request = submit!(app, &leave_body(&ctx));

    // Act: manager approves, then HR approves
    let resp = decide!(app, request.id, "approve", &decision_body("manager"));
    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Value = test::read_body_json(resp).await;
    assert_eq!(envelope["data"]["request"]["status"], json!("manager-approved"));
    assert_eq!(envelope["data"]["request"]["currentStep"], json!("hr"));

    let resp = decide!(app, request.id, "approve", &decision_body("hr"));
    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Value = test::read_body_json(resp).await;
    assert_eq!(envelope["data"]["request"]["status"], json!("approved"));
    assert_eq!(envelope["data"]["event"]["status"], json!("approved"));

    // A third decision attempt is rejected
    let resp = decide!(app, request.id, "approve", &decision_body("hr"));
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Assert: vacation debited exactly once
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/balances/{}?year=2025", ctx.employee_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let envelope: Value = test::read_body_json(resp).await;
    let vacation = envelope["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["leaveType"] == json!("vacation"))
        .expect("vacation row");
    assert_eq!(vacation["used"], json!("6.00"));
}

#[actix_web::test]
async fn test_manager_decline_skips_hr_and_keeps_balance() {
    // Arrange
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let request = submit!(app, &leave_body(&ctx));

    // Act: manager declines without a comment
    let resp = decide!(app, request.id, "decline", &decision_body("manager"));
    assert_eq!(resp.status(), StatusCode::OK);

    let envelope: Value = test::read_body_json(resp).await;
    let declined: Request =
        serde_json::from_value(envelope["data"]["request"].clone()).unwrap();
    assert_eq!(declined.status.to_string(), "declined");
    assert!(declined.hr_approval.is_none());
    assert_eq!(
        declined.manager_approval.unwrap().comments.as_deref(),
        Some("Request declined")
    );

    // HR can no longer act on it
    let resp = decide!(app, request.id, "approve", &decision_body("hr"));
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Assert: nothing was debited
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/balances/{}?year=2025", ctx.employee_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let envelope: Value = test::read_body_json(resp).await;
    let vacation = envelope["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["leaveType"] == json!("vacation"))
        .expect("vacation row");
    assert_eq!(vacation["used"], json!("0"));
}

#[actix_web::test]
async fn test_decision_by_wrong_role_is_forbidden() {
    // Arrange
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let request = submit!(app, &leave_body(&ctx));

    // Act: HR tries to decide the manager step
    let resp = decide!(app, request.id, "approve", &decision_body("hr"));

    // Assert
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/requests/{}", request.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let envelope: ApiResponse<Request> = test::read_body_json(resp).await;
    assert_eq!(envelope.data.unwrap().status.to_string(), "pending");
}

#[actix_web::test]
async fn test_preview_reflects_holidays_immediately() {
    // Arrange
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let uri = "/api/v1/requests/preview?start_date=2025-06-02&end_date=2025-06-06&granularity=full-day";

    // Act / Assert: five working days before the holiday exists
    let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Value = test::read_body_json(resp).await;
    assert_eq!(envelope["data"]["calculatedDays"], json!("5.00"));

    // Add a mid-week holiday through the API; the next preview sees it
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/holidays")
            .set_json(json!({
                "date": "2025-06-04",
                "kind": "company",
                "name": "Founders Day"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    let envelope: Value = test::read_body_json(resp).await;
    assert_eq!(envelope["data"]["calculatedDays"], json!("4.00"));
}

#[actix_web::test]
async fn test_republish_requires_a_decided_request() {
    // Arrange
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let request = submit!(app, &leave_body(&ctx));

    // Act / Assert: pending requests cannot be republished
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/requests/{}/republish", request.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // After a decision the notification can be re-sent, repeatedly
    let resp = decide!(app, request.id, "decline", &decision_body("manager"));
    assert_eq!(resp.status(), StatusCode::OK);

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/requests/{}/republish", request.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[actix_web::test]
async fn test_remote_request_skips_balance_entirely() {
    // Arrange: employee with no balance rows at all
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let stranger = Uuid::new_v4();

    let body = json!({
        "employeeId": stranger,
        "employeeName": "Robin Vance",
        "kind": "remote",
        "startDate": "2025-06-02",
        "endDate": "2025-06-06",
        "granularity": "full-day",
        "reason": "Working from the coast"
    });

    // Act
    let request = submit!(app, &body);
    let resp = decide!(app, request.id, "approve", &decision_body("manager"));
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = decide!(app, request.id, "approve", &decision_body("hr"));

    // Assert: approves fine despite the missing ledger rows
    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Value = test::read_body_json(resp).await;
    assert_eq!(envelope["data"]["request"]["status"], json!("approved"));
}

#[actix_web::test]
async fn test_get_requests_filters_by_status() {
    // Arrange
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let first = submit!(app, &leave_body(&ctx));

    let mut second_body = leave_body(&ctx);
    second_body["startDate"] = json!("2025-07-07");
    second_body["endDate"] = json!("2025-07-11");
    submit!(app, &second_body);

    let resp = decide!(app, first.id, "decline", &decision_body("manager"));
    assert_eq!(resp.status(), StatusCode::OK);

    // Act
    let req = test::TestRequest::get()
        .uri("/api/v1/requests?status=pending")
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Value = test::read_body_json(resp).await;
    let listed = envelope["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["startDate"], json!("2025-07-07"));

    let req = test::TestRequest::get()
        .uri("/api/v1/requests?status=weekend")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
