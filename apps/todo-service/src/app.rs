//! # ルーター構築
//!
//! ルーティングとミドルウェアを組み立てる。
//! `main.rs` とルーターレベルのテストから共有される。

use std::sync::Arc;

use axum::{Router, routing::get};
use todo_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        ReadinessState,
        TodoState,
        create_todo,
        delete_todo,
        get_todo,
        health_check,
        list_todos,
        readiness_check,
        update_todo,
    },
    openapi::openapi_json,
};

/// アプリケーションのルーターを構築する
pub fn build_router(todo_state: Arc<TodoState>, readiness_state: Arc<ReadinessState>) -> Router {
    let todo_routes = Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(todo_state);

    let health_routes = Router::new()
        .route("/api/healthy", get(health_check))
        .route("/api/healthy/ready", get(readiness_check))
        .with_state(readiness_state);

    Router::new()
        .merge(todo_routes)
        .merge(health_routes)
        .route("/api/docs/openapi.json", get(openapi_json))
        // Request ID ミドルウェア（レイヤーは下から上に適用される）
        // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: リクエストスパンに request_id を含める
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
