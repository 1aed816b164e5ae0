//! Integration tests for the HTTP API.
//!
//! The router runs against the real use-case with an in-memory gateway, so no
//! database is needed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::AppResult;
use domain::User;
use user_service_lib::api::{create_router, AppState};
use user_service_lib::infra::Database;
use user_service_lib::repository::UserRepository;
use user_service_lib::service::UserManager;

// =============================================================================
// In-memory gateway
// =============================================================================

#[derive(Default)]
struct InMemoryUsers {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUsers {
    fn find<F: Fn(&User) -> bool>(&self, pred: F) -> Option<User> {
        self.users.lock().unwrap().values().find(|u| pred(u)).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn save(&self, user: User) -> AppResult<User> {
        let id = user.id().unwrap_or_default().to_string();
        self.users.lock().unwrap().insert(id, user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.find(|u| u.email().value() == email))
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.find(|u| u.email().value() == email).is_some())
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.users.lock().unwrap().remove(id);
        Ok(())
    }

    async fn find_by_id_number(&self, id_number: &str) -> AppResult<Option<User>> {
        Ok(self.find(|u| u.id_number() == id_number))
    }

    async fn exists_by_email_or_id_number(
        &self,
        email: &str,
        id_number: &str,
    ) -> AppResult<bool> {
        Ok(self
            .find(|u| {
                (!email.is_empty() && u.email().value() == email)
                    || (!id_number.is_empty() && u.id_number() == id_number)
            })
            .is_some())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn app_with_database(database: MockDatabase) -> Router {
    let repo = Arc::new(InMemoryUsers::default());
    let state = AppState::new(
        Arc::new(UserManager::new(repo)),
        Arc::new(Database::from_connection(database.into_connection())),
    );
    create_router(state, Duration::from_secs(5))
}

fn app() -> Router {
    app_with_database(MockDatabase::new(DatabaseBackend::Postgres))
}

fn new_user() -> Value {
    json!({
        "name": "Steven",
        "lastName": "Garcia",
        "address": "Carrera 60 # 53-14",
        "phoneNumber": "3001234567",
        "birthDate": "1990-10-01",
        "email": "Steven.Garcia@test.com",
        "baseSalary": 50000.00,
        "idNumber": "1234567890"
    })
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, location, json)
}

async fn create(app: &Router) -> String {
    let (status, _, body) = send(app, Method::POST, "/api/v1/users", Some(new_user())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_returns_201_with_location() {
    let app = app();
    let (status, location, body) =
        send(&app, Method::POST, "/api/v1/users", Some(new_user())).await;

    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap();
    assert_eq!(location.as_deref(), Some(format!("/api/v1/users/{}", id).as_str()));
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["email"], "steven.garcia@test.com");
    assert_eq!(body["data"]["lastName"], "Garcia");
    assert_eq!(body["data"]["idNumber"], "1234567890");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = app();
    create(&app).await;

    let mut duplicate = new_user();
    duplicate["idNumber"] = json!("999");
    let (status, _, body) = send(&app, Method::POST, "/api/v1/users", Some(duplicate)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DATA_ALREADY_EXISTS");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("steven.garcia@test.com"));
}

#[tokio::test]
async fn duplicate_id_number_is_a_conflict() {
    let app = app();
    create(&app).await;

    let mut duplicate = new_user();
    duplicate["email"] = json!("someone.else@test.com");
    let (status, _, _) = send(&app, Method::POST, "/api/v1/users", Some(duplicate)).await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn padded_id_number_is_stored_trimmed() {
    let app = app();

    let mut padded = new_user();
    padded["idNumber"] = json!(" 123 ");
    let (status, _, body) = send(&app, Method::POST, "/api/v1/users", Some(padded)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["idNumber"], "123");

    let (status, _, body) =
        send(&app, Method::GET, "/api/v1/users/search?idNumber=123", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["idNumber"], "123");

    let mut duplicate = new_user();
    duplicate["email"] = json!("someone.else@test.com");
    duplicate["idNumber"] = json!("123");
    let (status, _, _) = send(&app, Method::POST, "/api/v1/users", Some(duplicate)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn structural_violations_are_listed_per_field() {
    let app = app();
    let mut invalid = new_user();
    invalid["phoneNumber"] = json!("300-123-4567");
    invalid["name"] = json!("  ");

    let (status, _, body) = send(&app, Method::POST, "/api/v1/users", Some(invalid)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "phoneNumber"]);
}

#[tokio::test]
async fn underage_user_fails_domain_validation() {
    let app = app();
    let mut minor = new_user();
    minor["birthDate"] = json!("2020-01-01");

    let (status, _, body) = send(&app, Method::POST, "/api/v1/users", Some(minor)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "User validation failed: User must be at least 18 years old"
    );
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Read
// =============================================================================

#[tokio::test]
async fn list_returns_every_user() {
    let app = app();
    create(&app).await;

    let (status, _, body) = send(&app, Method::GET, "/api/v1/users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Users retrieved successfully");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_by_id_found_and_missing() {
    let app = app();
    let id = create(&app).await;

    let (status, _, body) = send(&app, Method::GET, &format!("/api/v1/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Steven");

    let (status, _, body) = send(&app, Method::GET, "/api/v1/users/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "DATA_NOT_FOUND");
    assert_eq!(body["error"]["message"], "User not found with ID: ghost");
}

#[tokio::test]
async fn search_by_id_number_or_email() {
    let app = app();
    let id = create(&app).await;

    let (status, _, body) =
        send(&app, Method::GET, "/api/v1/users/search?idNumber=1234567890", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());

    let (status, _, body) = send(
        &app,
        Method::GET,
        "/api/v1/users/search?email=STEVEN.GARCIA%40test.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());

    let (status, _, _) =
        send(&app, Method::GET, "/api/v1/users/search?idNumber=000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_without_keys_is_a_bad_request() {
    let app = app();
    let (status, _, body) = send(&app, Method::GET, "/api/v1/users/search", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

// =============================================================================
// Update / Delete
// =============================================================================

#[tokio::test]
async fn update_replaces_fields() {
    let app = app();
    let id = create(&app).await;

    let mut changes = new_user();
    changes["name"] = json!("Esteban");
    changes["email"] = json!("esteban@test.com");
    changes.as_object_mut().unwrap().remove("idNumber");

    let (status, _, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/users/{}", id),
        Some(changes),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["name"], "Esteban");
    assert_eq!(body["data"]["idNumber"], "1234567890");
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let app = app();
    let (status, _, _) =
        send(&app, Method::PUT, "/api/v1/users/ghost", Some(new_user())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_lookup_is_not_found() {
    let app = app();
    let id = create(&app).await;
    let uri = format!("/api/v1/users/{}", id);

    let (status, _, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");
    assert!(body.get("data").is_none());

    let (status, _, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_database_status() {
    let database = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        },
    ]);
    let app = app_with_database(database);

    let (status, _, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "healthy");
}

#[tokio::test]
async fn health_degrades_when_database_fails() {
    let app = app();

    let (status, _, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"]["status"], "unhealthy");
}
