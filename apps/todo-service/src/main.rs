//! # Todo Service サーバー
//!
//! Todo リソースの CRUD API を提供する HTTP サーバー。
//!
//! ```text
//! handler → repository → store → PostgreSQL
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `TODO_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `TODO_PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `DATABASE_MAX_CONNECTIONS` | No | 最大接続数（デフォルト: `10`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログフィルタ |
//!
//! ## 起動方法
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p todo-service
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use todo_infra::{db, repository::TodoRepositoryImpl, store::PostgresTodoStore};
use todo_service::{
    app::build_router,
    config::TodoConfig,
    handler::{ReadinessState, TodoState},
};
use todo_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("todo-service");
    init_tracing(&tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = %tracing_config.service_name).entered();

    let config = TodoConfig::from_env().context("設定の読み込みに失敗しました")?;
    let addr = config.socket_addr()?;

    tracing::info!("Todo Service サーバーを起動します: {}", addr);

    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    let repository = TodoRepositoryImpl::new(Arc::new(PostgresTodoStore::new(pool.clone())));
    let todo_state = Arc::new(TodoState {
        repository: Arc::new(repository),
    });
    let readiness_state = Arc::new(ReadinessState { pool });

    let app = build_router(todo_state, readiness_state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Todo Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
