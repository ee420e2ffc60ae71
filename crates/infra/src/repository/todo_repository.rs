//! # TodoRepository
//!
//! Todo の CRUD 操作をストア呼び出しに変換し、ストアのエラーを
//! ドメインのエラー種別に変換する。
//!
//! ## エラー変換
//!
//! | ストアの結果 | リポジトリの結果 |
//! |-------------|-----------------|
//! | 該当行なし（`RowNotFound`） | `InfraErrorKind::NotFound` |
//! | その他の失敗 | そのまま返す |
//!
//! 一覧取得と作成には「該当行なし」が存在しないため、変換は行わない。

use std::sync::Arc;

use async_trait::async_trait;
use todo_domain::todo::{Todo, TodoDraft, TodoId, TodoTitle};

use crate::{
    error::InfraError,
    store::{TodoRow, TodoStore},
};

/// NotFound エラーに付与するエンティティ名
pub const TODO_ENTITY: &str = "Todo";

/// Todo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// 全 Todo を取得する。空のストアでは空の Vec を返す
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

    /// ID で Todo を取得する
    async fn find_by_id(&self, id: &TodoId) -> Result<Todo, InfraError>;

    /// Todo を作成し、採番された ID と作成日時を含む Todo を返す
    async fn create(&self, draft: &TodoDraft) -> Result<Todo, InfraError>;

    /// タイトルと内容を更新する。存在しない ID で新規作成はしない
    async fn update_by_id(&self, id: &TodoId, changes: &TodoDraft) -> Result<Todo, InfraError>;

    /// Todo を削除し、削除した ID を返す
    async fn delete_by_id(&self, id: &TodoId) -> Result<TodoId, InfraError>;
}

/// ストアを介した TodoRepository 実装
#[derive(Clone)]
pub struct TodoRepositoryImpl {
    store: Arc<dyn TodoStore>,
}

impl TodoRepositoryImpl {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TodoRepository for TodoRepositoryImpl {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        let rows = self.store.fetch_all().await?;
        rows.into_iter().map(into_todo).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &TodoId) -> Result<Todo, InfraError> {
        let row = self
            .store
            .fetch_one(*id.as_uuid())
            .await
            .map_err(|e| not_found_if_missing(e, id))?;
        into_todo(row)
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn create(&self, draft: &TodoDraft) -> Result<Todo, InfraError> {
        let row = self
            .store
            .insert(draft.title().as_str(), draft.contents())
            .await?;
        let todo = into_todo(row)?;
        tracing::debug!(todo_id = %todo.id(), "Todo を作成しました");
        Ok(todo)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update_by_id(&self, id: &TodoId, changes: &TodoDraft) -> Result<Todo, InfraError> {
        let row = self
            .store
            .update(*id.as_uuid(), changes.title().as_str(), changes.contents())
            .await
            .map_err(|e| not_found_if_missing(e, id))?;
        into_todo(row)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete_by_id(&self, id: &TodoId) -> Result<TodoId, InfraError> {
        let deleted = self
            .store
            .delete(*id.as_uuid())
            .await
            .map_err(|e| not_found_if_missing(e, id))?;
        Ok(TodoId::from_uuid(deleted))
    }
}

/// ストアの「該当行なし」を NotFound に変換する。それ以外はそのまま返す
fn not_found_if_missing(error: InfraError, id: &TodoId) -> InfraError {
    if error.is_row_not_found() {
        InfraError::not_found(TODO_ENTITY, id.to_string())
    } else {
        error
    }
}

fn into_todo(row: TodoRow) -> Result<Todo, InfraError> {
    // DB の CHECK 制約によりタイトルは常に有効だが、制約の外から書き込まれた行に備えて検証する
    let title = TodoTitle::new(row.title).map_err(|e| InfraError::unexpected(e.to_string()))?;
    Ok(Todo::from_db(
        TodoId::from_uuid(row.id),
        title,
        row.contents,
        row.created_at,
    ))
}
