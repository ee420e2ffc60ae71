//! # Todo ハンドラ
//!
//! Todo リソースの CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/todos` - Todo 一覧
//! - `POST /api/todos` - Todo 作成
//! - `GET /api/todos/{id}` - Todo 取得
//! - `PUT /api/todos/{id}` - Todo 更新
//! - `DELETE /api/todos/{id}` - Todo 削除（削除した ID を返す）

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_domain::todo::{Todo, TodoDraft, TodoId};
use todo_infra::repository::TodoRepository;
use todo_shared::ErrorResponse;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;

/// Todo API の共有状態
pub struct TodoState {
    pub repository: Arc<dyn TodoRepository>,
}

// --- リクエスト/レスポンス型 ---

/// Todo 作成・更新リクエスト
///
/// `id` や `create_at` を含めても無視される。
#[derive(Debug, Deserialize, ToSchema)]
pub struct TodoRequest {
    pub title:    String,
    pub contents: String,
}

/// Todo レスポンス
#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TodoResponse {
    pub id:         Uuid,
    pub title:      String,
    pub contents:   String,
    /// 作成日時（RFC 3339）
    #[serde(rename = "create_at")]
    pub created_at: DateTime<Utc>,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id:         *todo.id().as_uuid(),
            title:      todo.title().as_str().to_string(),
            contents:   todo.contents().to_string(),
            created_at: todo.created_at(),
        }
    }
}

impl TodoRequest {
    /// リクエストを検証して TodoDraft に変換する
    ///
    /// API では内容も必須とする（ストア上は空文字列を許容する）。
    fn into_draft(self) -> Result<TodoDraft, ApiError> {
        if self.contents.is_empty() {
            return Err(ApiError::Validation("内容は必須です".to_string()));
        }
        TodoDraft::new(self.title, self.contents).map_err(ApiError::from)
    }
}

/// パスパラメータを Todo ID として解釈する
fn parse_todo_id(raw: &str) -> Result<TodoId, ApiError> {
    raw.parse().map_err(|_| ApiError::todo_not_found(raw))
}

// --- ハンドラ ---

/// GET /api/todos
#[utoipa::path(
    get,
    path = "/api/todos",
    tag = "todos",
    responses(
        (status = 200, description = "Todo 一覧", body = Vec<TodoResponse>),
        (status = 500, description = "内部エラー", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_todos(
    State(state): State<Arc<TodoState>>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let todos = state.repository.find_all().await?;
    Ok(Json(todos.iter().map(TodoResponse::from).collect()))
}

/// GET /api/todos/{id}
#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo", body = TodoResponse),
        (status = 404, description = "Todo が見つからない", body = ErrorResponse),
        (status = 500, description = "内部エラー", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, ApiError> {
    let id = parse_todo_id(&id)?;
    let todo = state.repository.find_by_id(&id).await?;
    Ok(Json(TodoResponse::from(&todo)))
}

/// POST /api/todos
///
/// ## レスポンス
///
/// - `201 Created`: 作成された Todo（ID と作成日時を含む）
/// - `400 Bad Request`: 本文の形式不正、タイトル・内容の未入力
#[utoipa::path(
    post,
    path = "/api/todos",
    tag = "todos",
    request_body = TodoRequest,
    responses(
        (status = 201, description = "作成された Todo", body = TodoResponse),
        (status = 400, description = "リクエスト不正", body = ErrorResponse),
        (status = 500, description = "内部エラー", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_todo(
    State(state): State<Arc<TodoState>>,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let draft = req.into_draft()?;

    let todo = state.repository.create(&draft).await?;

    Ok((StatusCode::CREATED, Json(TodoResponse::from(&todo))))
}

/// PUT /api/todos/{id}
///
/// タイトルと内容を置き換える。ID と作成日時は変わらない。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の Todo
/// - `400 Bad Request`: 本文の形式不正（ID の存在確認より先に判定する）
/// - `404 Not Found`: Todo が見つからない
#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    request_body = TodoRequest,
    responses(
        (status = 200, description = "更新後の Todo", body = TodoResponse),
        (status = 400, description = "リクエスト不正", body = ErrorResponse),
        (status = 404, description = "Todo が見つからない", body = ErrorResponse),
        (status = 500, description = "内部エラー", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, ApiError> {
    let Json(req) = payload?;
    let changes = req.into_draft()?;
    let id = parse_todo_id(&id)?;

    let todo = state.repository.update_by_id(&id, &changes).await?;

    Ok(Json(TodoResponse::from(&todo)))
}

/// DELETE /api/todos/{id}
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "削除した Todo の ID", body = String),
        (status = 404, description = "Todo が見つからない", body = ErrorResponse),
        (status = 500, description = "内部エラー", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Result<Json<String>, ApiError> {
    let id = parse_todo_id(&id)?;
    let deleted = state.repository.delete_by_id(&id).await?;
    Ok(Json(deleted.to_string()))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Method, Request},
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use todo_domain::clock::FixedClock;
    use todo_infra::{mock::InMemoryTodoStore, repository::TodoRepositoryImpl};
    use tower::ServiceExt;

    use super::*;

    // --- ヘルパー ---

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn create_test_app(store: InMemoryTodoStore) -> Router {
        let repository = TodoRepositoryImpl::new(Arc::new(store));
        let state = Arc::new(TodoState {
            repository: Arc::new(repository),
        });

        Router::new()
            .route("/api/todos", get(list_todos).post(create_todo))
            .route(
                "/api/todos/{id}",
                get(get_todo).put(update_todo).delete(delete_todo),
            )
            .with_state(state)
    }

    fn create_store() -> InMemoryTodoStore {
        InMemoryTodoStore::with_clock(Arc::new(FixedClock::new(fixed_now())))
    }

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn response_body<T: serde::de::DeserializeOwned>(
        response: axum::http::Response<Body>,
    ) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(sut: &Router, title: &str, contents: &str) -> TodoResponse {
        let response = sut
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/todos",
                json!({ "title": title, "contents": contents }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        response_body(response).await
    }

    // --- 作成 ---

    #[tokio::test]
    async fn test_post_todoを作成すると201と作成結果が返る() {
        // Given
        let sut = create_test_app(create_store());

        // When
        let response = sut
            .oneshot(json_request(
                Method::POST,
                "/api/todos",
                json!({ "title": "buy milk", "contents": "2%" }),
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: serde_json::Value = response_body(response).await;
        assert_eq!(body["title"], "buy milk");
        assert_eq!(body["contents"], "2%");
        assert_eq!(body["create_at"], "2023-11-14T22:13:20Z");
        assert!(body["id"].as_str().unwrap().parse::<Uuid>().is_ok());
    }

    #[tokio::test]
    async fn test_post_本文のidと作成日時は無視される() {
        let sut = create_test_app(create_store());
        let supplied = Uuid::now_v7();

        let response = sut
            .oneshot(json_request(
                Method::POST,
                "/api/todos",
                json!({
                    "id": supplied,
                    "title": "buy milk",
                    "contents": "2%",
                    "create_at": "2000-01-01T00:00:00Z"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: TodoResponse = response_body(response).await;
        assert_ne!(body.id, supplied);
        assert_eq!(body.created_at, fixed_now());
    }

    #[tokio::test]
    async fn test_post_タイトルの前後の空白は保持されて返る() {
        let sut = create_test_app(create_store());

        let created = create(&sut, "  buy milk  ", "2%").await;
        assert_eq!(created.title, "  buy milk  ");

        let response = sut
            .oneshot(empty_request(
                Method::GET,
                &format!("/api/todos/{}", created.id),
            ))
            .await
            .unwrap();
        let found: TodoResponse = response_body(response).await;
        assert_eq!(found, created);
    }

    #[rstest]
    #[case::タイトルが空(json!({ "title": "", "contents": "2%" }))]
    #[case::タイトルが空白のみ(json!({ "title": "   ", "contents": "2%" }))]
    #[case::タイトルがない(json!({ "contents": "2%" }))]
    #[case::内容がない(json!({ "title": "buy milk" }))]
    #[case::内容が空(json!({ "title": "buy milk", "contents": "" }))]
    #[case::型が違う(json!({ "title": 1, "contents": "2%" }))]
    #[tokio::test]
    async fn test_post_不正な本文は400とエラー配列が返る(#[case] body: serde_json::Value) {
        let store = create_store();
        let sut = create_test_app(store.clone());

        let response = sut
            .oneshot(json_request(Method::POST, "/api/todos", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response_body(response).await;
        assert_eq!(body.errors.len(), 1);
        assert!(store.rows().is_empty(), "Todo が作成されないこと");
    }

    #[tokio::test]
    async fn test_post_jsonとして解釈できない本文は400が返る() {
        let sut = create_test_app(create_store());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/todos")
            .header("content-type", "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let response = sut.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response_body(response).await;
        assert!(body.first_message().is_some());
    }

    // --- 一覧・取得 ---

    #[tokio::test]
    async fn test_get_空のストアでは空配列が返る() {
        let sut = create_test_app(create_store());

        let response = sut
            .oneshot(empty_request(Method::GET, "/api/todos"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<TodoResponse> = response_body(response).await;
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_get_作成したtodoが一覧に含まれる() {
        let sut = create_test_app(create_store());
        let first = create(&sut, "first", "1").await;
        let second = create(&sut, "second", "2").await;

        let response = sut
            .oneshot(empty_request(Method::GET, "/api/todos"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<TodoResponse> = response_body(response).await;
        assert_eq!(body, vec![first, second]);
    }

    #[tokio::test]
    async fn test_get_idを指定すると作成結果と同じtodoが返る() {
        let sut = create_test_app(create_store());
        let created = create(&sut, "buy milk", "2%").await;

        let response = sut
            .oneshot(empty_request(
                Method::GET,
                &format!("/api/todos/{}", created.id),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: TodoResponse = response_body(response).await;
        assert_eq!(body, created);
    }

    #[rstest]
    #[case::存在しないuuid(Uuid::now_v7().to_string())]
    #[case::uuidでない文字列("abc".to_string())]
    #[tokio::test]
    async fn test_get_存在しないidは404が返る(#[case] id: String) {
        let sut = create_test_app(create_store());

        let response = sut
            .oneshot(empty_request(Method::GET, &format!("/api/todos/{id}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = response_body(response).await;
        assert_eq!(
            body.first_message(),
            Some(format!("Todo が見つかりません: {id}").as_str())
        );
    }

    // --- 更新 ---

    #[tokio::test]
    async fn test_put_idと作成日時を保持して内容を更新する() {
        // Given
        let sut = create_test_app(create_store());
        let created = create(&sut, "buy milk", "2%").await;

        // When
        let response = sut
            .clone()
            .oneshot(json_request(
                Method::PUT,
                &format!("/api/todos/{}", created.id),
                json!({ "title": "buy milk", "contents": "whole" }),
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: TodoResponse = response_body(response).await;
        assert_eq!(
            body,
            TodoResponse {
                contents: "whole".to_string(),
                ..created
            }
        );
    }

    #[tokio::test]
    async fn test_put_存在しないidは404が返り作成されない() {
        let store = create_store();
        let sut = create_test_app(store.clone());

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                &format!("/api/todos/{}", Uuid::now_v7()),
                json!({ "title": "NOT EXISTS TODO", "contents": "NOT EXISTS CONTENTS" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_put_存在しないidでも本文が不正なら400が返る() {
        let sut = create_test_app(create_store());

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                &format!("/api/todos/{}", Uuid::now_v7()),
                json!({ "title": "" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_put_内容が空なら400が返り更新されない() {
        let store = create_store();
        let sut = create_test_app(store.clone());
        let created = create(&sut, "buy milk", "2%").await;

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                &format!("/api/todos/{}", created.id),
                json!({ "title": "buy milk", "contents": "" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response_body(response).await;
        assert_eq!(body.first_message(), Some("内容は必須です"));
        assert_eq!(store.rows()[0].contents, "2%");
    }

    // --- 削除 ---

    #[tokio::test]
    async fn test_delete_削除したidが文字列で返り以降の取得は404になる() {
        let sut = create_test_app(create_store());
        let created = create(&sut, "buy milk", "2%").await;
        let uri = format!("/api/todos/{}", created.id);

        let response = sut
            .clone()
            .oneshot(empty_request(Method::DELETE, &uri))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: String = response_body(response).await;
        assert_eq!(body, created.id.to_string());

        let response = sut
            .oneshot(empty_request(Method::GET, &uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_存在しないidは404が返る() {
        let sut = create_test_app(create_store());

        let response = sut
            .oneshot(empty_request(
                Method::DELETE,
                &format!("/api/todos/{}", Uuid::now_v7()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // --- ストア障害 ---

    #[rstest]
    #[case::一覧(Method::GET, "/api/todos", None)]
    #[case::作成(Method::POST, "/api/todos", Some(json!({ "title": "t", "contents": "c" })))]
    #[tokio::test]
    async fn test_ストア障害は500と固定メッセージが返る(
        #[case] method: Method,
        #[case] uri: &str,
        #[case] body: Option<serde_json::Value>,
    ) {
        let store = create_store();
        store.set_unavailable(true);
        let sut = create_test_app(store);

        let request = match body {
            Some(body) => json_request(method, uri, body),
            None => empty_request(method, uri),
        };
        let response = sut.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response_body(response).await;
        assert_eq!(
            body,
            ErrorResponse::internal_error(),
            "内部情報を含まないこと"
        );
    }

    #[tokio::test]
    async fn test_id指定の操作でもストア障害は404ではなく500になる() {
        let store = create_store();
        let sut = create_test_app(store.clone());
        let created = create(&sut, "buy milk", "2%").await;
        store.set_unavailable(true);

        let response = sut
            .oneshot(empty_request(
                Method::GET,
                &format!("/api/todos/{}", created.id),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
