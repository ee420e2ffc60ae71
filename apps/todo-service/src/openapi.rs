//! # OpenAPI 仕様定義
//!
//! utoipa を使用して Todo API の OpenAPI 仕様を Rust の型から自動生成する。
//! `ApiDoc::openapi()` で OpenAPI ドキュメントを取得できる。
//! 実行中のサーバーからは `GET /api/docs/openapi.json` で取得できる。

use axum::Json;
use utoipa::OpenApi;

use crate::handler::{health, todo};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "Todo リソースの CRUD API"
    ),
    paths(
        // health
        health::health_check,
        health::readiness_check,
        // todos
        todo::list_todos,
        todo::create_todo,
        todo::get_todo,
        todo::update_todo,
        todo::delete_todo,
    ),
    components(schemas(
        todo_shared::ErrorResponse,
        todo_shared::ErrorMessage,
    )),
    tags(
        (name = "health", description = "ヘルスチェック"),
        (name = "todos", description = "Todo の作成・参照・更新・削除"),
    )
)]
pub struct ApiDoc;

/// GET /api/docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
