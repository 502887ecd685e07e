// hr-client/tests/http_integration.rs
// HTTP client and dashboard against an in-process mock backend

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use hr_client::forms::{LoginForm, SalaryForm};
use hr_client::models::{Attendance, Employee};
use hr_client::{
    ApiClient, ClientConfig, ClientError, Dashboard, EMPLOYEE_ACTIVE, ErrorKind, Level,
    MemoryNavigator, Navigator, PageQuery, RecordId, ResourceApi, SessionStore,
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use shared::client::LoginRequest;

const GOOD_TOKEN: &str = "good-token";

#[derive(Default)]
struct Seen {
    auth: Vec<Option<String>>,
    queries: Vec<HashMap<String, String>>,
    bodies: Vec<Value>,
}

type Backend = Arc<Mutex<Seen>>;

fn authorized(seen: &Backend, headers: &HeaderMap) -> bool {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let ok = auth.as_deref() == Some(format!("Bearer {GOOD_TOKEN}").as_str());
    seen.lock().auth.push(auth);
    ok
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"}))).into_response()
}

const NAMES: [&str; 12] = [
    "Anna", "Bob", "Carl", "Dana", "Evan", "Fay", "Gus", "Hana", "Ivo", "Jan", "Kai", "Lena",
];

async fn list_employees(
    State(seen): State<Backend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&seen, &headers) {
        return unauthorized();
    }
    seen.lock().queries.push(params.clone());

    let search = params.get("search").cloned().unwrap_or_default().to_lowercase();
    let matching: Vec<(usize, &str)> = NAMES
        .iter()
        .enumerate()
        .filter(|(_, n)| n.to_lowercase().contains(&search))
        .map(|(i, n)| (i, *n))
        .collect();

    let data: Vec<Value> = match (params.get("page"), params.get("limit")) {
        (Some(page), Some(limit)) => {
            let page: usize = page.parse().unwrap();
            let limit: usize = limit.parse().unwrap();
            matching.iter().skip((page - 1) * limit).take(limit).map(employee_json).collect()
        }
        _ => matching.iter().map(employee_json).collect(),
    };
    Json(json!({ "data": data, "totalCount": matching.len() })).into_response()
}

fn employee_json((i, name): &(usize, &str)) -> Value {
    json!({ "id": i + 1, "name": name, "isActive": i % 2 == 0, "department": "Ops" })
}

async fn update_status(
    State(seen): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&seen, &headers) {
        return unauthorized();
    }
    seen.lock().bodies.push(body);
    if id == "13" {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "Employee is locked"})))
            .into_response();
    }
    Json(json!({"message": "Status updated"})).into_response()
}

async fn attendance(State(seen): State<Backend>, headers: HeaderMap) -> Response {
    if !authorized(&seen, &headers) {
        return unauthorized();
    }
    (StatusCode::BAD_GATEWAY, "upstream exploded").into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    match body["password"].as_str() {
        Some("secret") => {
            Json(json!({"message": "ok", "data": {"token": GOOD_TOKEN}})).into_response()
        }
        Some("no-token") => Json(json!({"message": "ok", "data": {}})).into_response(),
        Some("expired") => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid email or password"})),
        )
            .into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response(),
    }
}

async fn logout() -> StatusCode {
    StatusCode::OK
}

async fn store_salary(
    State(seen): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&seen, &headers) {
        return unauthorized();
    }
    seen.lock().bodies.push(body);
    (StatusCode::CREATED, Json(json!({"message": "Salary created"}))).into_response()
}

async fn spawn_backend() -> (String, Backend) {
    let seen = Backend::default();
    let app = Router::new()
        .route("/api/employee/v1/getAllEmployee", get(list_employees))
        .route("/api/employee/v1/updateEmployeeStatus/{id}", patch(update_status))
        .route("/api/employee/v1/login", post(login))
        .route("/api/employee/v1/logout", post(logout))
        .route("/api/attendance/v1/getAttendance", get(attendance))
        .route("/api/salary/v1/storeSalary", post(store_salary))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), seen)
}

fn client(base_url: &str, token: Option<&str>) -> (ApiClient, SessionStore, Arc<MemoryNavigator>) {
    let session = SessionStore::in_memory();
    if let Some(token) = token {
        session.set(token).unwrap();
    }
    let navigator = Arc::new(MemoryNavigator::new("/employee"));
    let config = ClientConfig::new(base_url);
    let client = ApiClient::new(&config, session.clone(), navigator.clone()).unwrap();
    (client, session, navigator)
}

#[tokio::test]
async fn test_bearer_attached_and_page_parsed() {
    let (url, seen) = spawn_backend().await;
    let (client, _, navigator) = client(&url, Some(GOOD_TOKEN));

    let page = ResourceApi::<Employee>::fetch_page(&client, &PageQuery::new(3, 5))
        .await
        .unwrap();

    assert_eq!(page.total_count, 12);
    let names: Vec<&str> = page.records.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Kai", "Lena"]);
    assert_eq!(page.records[0].id, RecordId::from(11));
    assert_eq!(page.records[0].extra.len(), 0);

    let seen = seen.lock();
    assert_eq!(seen.auth, vec![Some(format!("Bearer {GOOD_TOKEN}"))]);
    assert_eq!(seen.queries[0].get("search").map(String::as_str), Some(""));
    assert_eq!(seen.queries[0].get("limit").map(String::as_str), Some("5"));
    assert!(navigator.navigations().is_empty());
}

#[tokio::test]
async fn test_missing_credential_still_sends_request() {
    let (url, seen) = spawn_backend().await;
    let (client, session, navigator) = client(&url, None);

    let err = ResourceApi::<Employee>::fetch_page(&client, &PageQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert_eq!(seen.lock().auth, vec![None]);
    assert!(session.get().is_none());
    assert_eq!(navigator.navigations(), vec!["/auth".to_string()]);
}

#[tokio::test]
async fn test_rejected_credential_is_cleared_once() {
    let (url, _) = spawn_backend().await;
    let (client, session, navigator) = client(&url, Some("expired"));
    let mut events = session.subscribe();

    let request = EMPLOYEE_ACTIVE.request(&RecordId::from(1), &true).unwrap();
    let err = ResourceApi::<Employee>::update(&client, request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
    assert!(session.get().is_none());
    assert_eq!(navigator.navigations(), vec!["/auth".to_string()]);
    assert_eq!(events.try_recv().unwrap(), hr_client::SessionEvent::Cleared);
}

#[tokio::test]
async fn test_error_body_message_is_surfaced() {
    let (url, seen) = spawn_backend().await;
    let (client, _, _) = client(&url, Some(GOOD_TOKEN));

    let request = EMPLOYEE_ACTIVE.request(&RecordId::from(13), &false).unwrap();
    let err = ResourceApi::<Employee>::update(&client, request).await.unwrap_err();
    match err {
        ClientError::Api { status, ref message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Employee is locked");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(seen.lock().bodies, vec![json!({"isActive": false})]);

    // Non-JSON bodies come through as raw text
    let err = ResourceApi::<Attendance>::fetch_page(&client, &PageQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.server_message(), Some("upstream exploded"));
}

#[tokio::test]
async fn test_login_stores_token() {
    let (url, _) = spawn_backend().await;
    let (client, session, _) = client(&url, None);

    let request = LoginRequest {
        email: "anna@hr.io".into(),
        password: "secret".into(),
    };
    assert_eq!(client.login(&request).await.unwrap(), GOOD_TOKEN);
    assert_eq!(session.get().as_deref(), Some(GOOD_TOKEN));

    session.clear().unwrap();
    let request = LoginRequest {
        email: "anna@hr.io".into(),
        password: "no-token".into(),
    };
    let err = client.login(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
    assert!(session.get().is_none());
}

#[tokio::test]
async fn test_dashboard_flow() {
    let (url, seen) = spawn_backend().await;
    let navigator = Arc::new(MemoryNavigator::new("/auth"));
    let config = ClientConfig::new(&url).with_home_route("/employee");
    let dashboard =
        Dashboard::with_session(&config, SessionStore::in_memory(), navigator.clone()).unwrap();
    let mut rx = dashboard.notifications();

    let err = dashboard
        .login(LoginForm::new("anna@hr.io", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.server_message(), Some("Invalid credentials"));
    assert_eq!(rx.try_recv().unwrap().message, "Invalid credentials");

    dashboard.login(LoginForm::new("anna@hr.io", "secret")).await.unwrap();
    assert_eq!(rx.try_recv().unwrap().message, "Login successful");
    assert_eq!(navigator.current(), "/employee");

    navigator.replace("/employee?page=2");
    let employees = dashboard.employees();
    employees.mount().await.unwrap();
    let names: Vec<String> = employees.records().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["Fay", "Gus", "Hana", "Ivo", "Jan"]);
    assert_eq!(employees.page_numbers(), vec![1, 2, 3]);

    // Fay (id 6) is inactive on the backend
    let fay = RecordId::from(6);
    employees.updater().set_field(&fay, &EMPLOYEE_ACTIVE, true).await.unwrap();
    assert!(employees.records()[0].is_active);
    assert_eq!(rx.try_recv().unwrap().level, Level::Success);

    let salary = SalaryForm {
        basic_salary: "1200".into(),
        month: "5".into(),
        year: "2025".into(),
        payment_method: "cash".into(),
        employee_id: "6".into(),
    };
    dashboard.create_salary(salary).await.unwrap();
    assert_eq!(rx.try_recv().unwrap().message, "Salary created successfully");
    assert_eq!(
        seen.lock().bodies.last().cloned(),
        Some(json!({
            "basicSalary": 1200.0,
            "month": 5,
            "year": 2025,
            "paymentMethod": "cash",
            "status": false,
            "employeeId": 6
        }))
    );

    let options = dashboard.employee_options().await.unwrap();
    assert_eq!(options.len(), 12);

    dashboard.logout().await.unwrap();
    assert!(dashboard.session().get().is_none());
    assert_eq!(navigator.current(), "/auth");
    assert!(!employees.is_mounted());
}

#[tokio::test]
async fn test_rejected_login_shows_server_message() {
    let (url, _) = spawn_backend().await;
    let navigator = Arc::new(MemoryNavigator::new("/auth"));
    let config = ClientConfig::new(&url);
    let dashboard =
        Dashboard::with_session(&config, SessionStore::in_memory(), navigator.clone()).unwrap();
    let mut rx = dashboard.notifications();

    let err = dashboard
        .login(LoginForm::new("anna@hr.io", "expired"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(err.server_message(), Some("Invalid email or password"));
    let n = rx.try_recv().unwrap();
    assert_eq!(n.level, Level::Error);
    assert_eq!(n.message, "Invalid email or password");
    assert!(dashboard.session().get().is_none());
}
