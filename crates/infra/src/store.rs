//! # Todo ストアアダプタ
//!
//! `todos` テーブルに対する行単位のクエリ実行を担当する。
//!
//! ## 設計方針
//!
//! - **狭いインターフェース**: 1 操作 = 1 ラウンドトリップ。行を返すだけで解釈はしない
//! - **該当行なしの報告**: 対象行が存在しない場合は `sqlx::Error::RowNotFound` を返す。
//!   UPDATE / DELETE も `RETURNING` で 1 行を取得するため、影響行数 0 は「該当行なし」になる
//! - **差し替え可能**: リポジトリはこのトレイトにのみ依存する

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// `todos` テーブルの 1 行
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TodoRow {
    pub id:         Uuid,
    pub title:      String,
    pub contents:   String,
    pub created_at: DateTime<Utc>,
}

/// Todo ストアトレイト
///
/// すべてのメソッドは対象行が存在しない場合に `sqlx::Error::RowNotFound` 由来の
/// [`InfraError`] を返す。その他の失敗（接続・制約違反など）はそのまま返す。
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// 全行を取得する（順序は同一状態のストアに対して安定）
    async fn fetch_all(&self) -> Result<Vec<TodoRow>, InfraError>;

    /// ID で 1 行取得する
    async fn fetch_one(&self, id: Uuid) -> Result<TodoRow, InfraError>;

    /// 行を挿入する。ID と作成日時はストアが採番する
    async fn insert(&self, title: &str, contents: &str) -> Result<TodoRow, InfraError>;

    /// タイトルと内容を更新し、更新後の行を返す
    async fn update(&self, id: Uuid, title: &str, contents: &str) -> Result<TodoRow, InfraError>;

    /// 行を削除し、削除した ID を返す
    async fn delete(&self, id: Uuid) -> Result<Uuid, InfraError>;
}

/// PostgreSQL 実装の TodoStore
#[derive(Debug, Clone)]
pub struct PostgresTodoStore {
    pool: PgPool,
}

impl PostgresTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PostgresTodoStore {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn fetch_all(&self) -> Result<Vec<TodoRow>, InfraError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, contents, created_at
            FROM todos
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn fetch_one(&self, id: Uuid) -> Result<TodoRow, InfraError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, contents, created_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, title: &str, contents: &str) -> Result<TodoRow, InfraError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (title, contents)
            VALUES ($1, $2)
            RETURNING id, title, contents, created_at
            "#,
        )
        .bind(title)
        .bind(contents)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: Uuid, title: &str, contents: &str) -> Result<TodoRow, InfraError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET title = $2, contents = $3
            WHERE id = $1
            RETURNING id, title, contents, created_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(contents)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: Uuid) -> Result<Uuid, InfraError> {
        let deleted = sqlx::query_scalar::<_, Uuid>(
            r#"
            DELETE FROM todos
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(deleted)
    }
}
