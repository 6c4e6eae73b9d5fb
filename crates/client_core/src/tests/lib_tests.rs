use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
    routing::{delete, get},
    Json, Router,
};
use shared::{
    domain::{Address, Company, Geo},
    error::ErrorCode,
};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

fn sample_user(id: i64, name: &str) -> UserRecord {
    UserRecord {
        id: UserId(id),
        name: name.to_string(),
        username: None,
        email: format!("{}@example.org", name.to_ascii_lowercase()),
        address: Address {
            street: "Kulas Light".to_string(),
            suite: "Apt. 556".to_string(),
            city: "Gwenborough".to_string(),
            zipcode: "92998-3874".to_string(),
            geo: Geo {
                lat: "-37.3159".to_string(),
                lng: "81.1496".to_string(),
            },
        },
        phone: "1-770-736-8031".to_string(),
        website: "hildegard.org".to_string(),
        company: Company {
            name: "Romaguera-Crona".to_string(),
            catch_phrase: "Multi-layered client-server neural-net".to_string(),
            bs: "harness real-time e-markets".to_string(),
        },
    }
}

#[derive(Clone)]
struct MockState {
    users: Vec<UserRecord>,
    list_status: StatusCode,
    delete_status: StatusCode,
    deleted: Arc<Mutex<Vec<i64>>>,
}

impl MockState {
    fn ok(users: Vec<UserRecord>) -> Self {
        Self {
            users,
            list_status: StatusCode::OK,
            delete_status: StatusCode::OK,
            deleted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn with_list_status(mut self, status: StatusCode) -> Self {
        self.list_status = status;
        self
    }

    fn with_delete_status(mut self, status: StatusCode) -> Self {
        self.delete_status = status;
        self
    }
}

async fn handle_list_users(State(state): State<MockState>) -> AxumResponse {
    if state.list_status != StatusCode::OK {
        return state.list_status.into_response();
    }
    Json(state.users.clone()).into_response()
}

async fn handle_delete_user(State(state): State<MockState>, Path(id): Path<i64>) -> StatusCode {
    state.deleted.lock().await.push(id);
    state.delete_status
}

fn mock_router(state: MockState) -> Router {
    Router::new()
        .route("/users", get(handle_list_users))
        .route("/users/:id", delete(handle_delete_user))
        .with_state(state)
}

async fn spawn_server(app: Router) -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn list_users_preserves_server_order() {
    let state = MockState::ok(vec![
        sample_user(2, "Ervin"),
        sample_user(1, "Leanne"),
        sample_user(3, "Clementine"),
    ]);
    let server_url = spawn_server(mock_router(state)).await.expect("spawn server");
    let client = HttpUserDirectory::new(&server_url).expect("client");

    let users = client.list_users().await.expect("list users");

    let ids: Vec<i64> = users.iter().map(|user| user.id.0).collect();
    assert_eq!(ids, vec![2, 1, 3]);
    assert_eq!(users[0].name, "Ervin");
}

#[tokio::test]
async fn list_users_reports_server_error_status() {
    let state = MockState::ok(vec![sample_user(1, "Leanne")])
        .with_list_status(StatusCode::INTERNAL_SERVER_ERROR);
    let server_url = spawn_server(mock_router(state)).await.expect("spawn server");
    let client = HttpUserDirectory::new(&server_url).expect("client");

    let err = client.list_users().await.expect_err("500 must fail");

    assert_eq!(err.status(), Some(500));
    match err {
        ClientError::Rejected(api) => assert_eq!(api.code, ErrorCode::Internal),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn list_users_rejects_malformed_payload() {
    let app = Router::new().route("/users", get(|| async { "definitely not json" }));
    let server_url = spawn_server(app).await.expect("spawn server");
    let client = HttpUserDirectory::new(&server_url).expect("client");

    let err = client.list_users().await.expect_err("payload must fail");

    assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn list_users_accepts_trailing_slash_in_base_url() {
    let state = MockState::ok(vec![sample_user(1, "Leanne")]);
    let server_url = spawn_server(mock_router(state)).await.expect("spawn server");
    let client = HttpUserDirectory::new(&format!("{server_url}/")).expect("client");

    let users = client.list_users().await.expect("list users");

    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn delete_user_targets_id_path() {
    let state = MockState::ok(vec![sample_user(1, "Leanne"), sample_user(2, "Ervin")]);
    let deleted = state.deleted.clone();
    let server_url = spawn_server(mock_router(state)).await.expect("spawn server");
    let client = HttpUserDirectory::new(&server_url).expect("client");

    client.delete_user(UserId(2)).await.expect("delete user");

    assert_eq!(*deleted.lock().await, vec![2]);
}

#[tokio::test]
async fn delete_user_reports_not_found() {
    let state = MockState::ok(Vec::new()).with_delete_status(StatusCode::NOT_FOUND);
    let server_url = spawn_server(mock_router(state)).await.expect("spawn server");
    let client = HttpUserDirectory::new(&server_url).expect("client");

    let err = client.delete_user(UserId(1)).await.expect_err("404 must fail");

    assert_eq!(err.status(), Some(404));
    assert!(!err.is_transport());
    match err {
        ClientError::Rejected(api) => assert_eq!(api.code, ErrorCode::NotFound),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn delete_user_surfaces_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let client = HttpUserDirectory::new(&format!("http://{addr}")).expect("client");

    let err = client.delete_user(UserId(1)).await.expect_err("closed port must fail");

    assert!(err.is_transport(), "got {err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn request_timeout_is_reported_as_transport_failure() {
    let app = Router::new().route(
        "/users",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(Vec::<UserRecord>::new())
        }),
    );
    let server_url = spawn_server(app).await.expect("spawn server");
    let client = HttpUserDirectory::with_timeout(&server_url, Some(Duration::from_millis(100)))
        .expect("client");

    let err = client.list_users().await.expect_err("slow server must time out");

    assert!(err.is_transport(), "got {err:?}");
}

#[test]
fn rejects_non_http_base_url() {
    let err = HttpUserDirectory::new("ftp://example.org").expect_err("ftp must fail");
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}

#[test]
fn rejects_unparseable_base_url() {
    let err = HttpUserDirectory::new("not a url").expect_err("garbage must fail");
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}

#[test]
fn rejects_base_url_with_query() {
    let err = HttpUserDirectory::new("https://example.org/api?x=1").expect_err("query must fail");
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}

#[test]
fn builds_endpoints_from_base_url() {
    let client = HttpUserDirectory::new(" https://example.org/api/ ").expect("client");
    assert_eq!(client.base_url(), "https://example.org/api");
    assert_eq!(client.users_url(), "https://example.org/api/users");
    assert_eq!(client.user_url(UserId(7)), "https://example.org/api/users/7");
}

#[test]
fn default_base_url_is_valid() {
    let client = HttpUserDirectory::new(DEFAULT_API_BASE_URL).expect("client");
    assert_eq!(client.users_url(), "https://jsonplaceholder.typicode.com/users");
}
