//! # テスト用インメモリストア
//!
//! リポジトリ・ハンドラのテストで使用するインメモリの [`TodoStore`]。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todo-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! PostgreSQL 実装と同じく、対象行が存在しない場合は `sqlx::Error::RowNotFound` を返す。
//! [`InMemoryTodoStore::set_unavailable`] で接続障害を再現できる。

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use todo_domain::{
    clock::{Clock, SystemClock},
    todo::TodoId,
};
use uuid::Uuid;

use crate::{
    error::InfraError,
    store::{TodoRow, TodoStore},
};

/// インメモリの TodoStore
///
/// `Clone` したインスタンスは同じ行を共有する。
#[derive(Clone)]
pub struct InMemoryTodoStore {
    rows:        Arc<Mutex<Vec<TodoRow>>>,
    clock:       Arc<dyn Clock>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// 作成日時の採番に使う Clock を指定して作成する
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            clock,
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 接続障害を再現する
    ///
    /// `true` の間、すべての操作が `sqlx::Error::PoolTimedOut` を返す。
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// 行を直接追加する（ストアの採番を経由しない）
    pub fn push_row(&self, row: TodoRow) {
        self.rows.lock().unwrap().push(row);
    }

    /// 現在の全行のスナップショット
    pub fn rows(&self) -> Vec<TodoRow> {
        self.rows.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), InfraError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(())
    }
}

impl Default for InMemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn fetch_all(&self) -> Result<Vec<TodoRow>, InfraError> {
        self.check_available()?;
        Ok(self.rows())
    }

    async fn fetch_one(&self, id: Uuid) -> Result<TodoRow, InfraError> {
        self.check_available()?;
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or_else(|| sqlx::Error::RowNotFound.into())
    }

    async fn insert(&self, title: &str, contents: &str) -> Result<TodoRow, InfraError> {
        self.check_available()?;
        let row = TodoRow {
            id:         *TodoId::new().as_uuid(),
            title:      title.to_string(),
            contents:   contents.to_string(),
            created_at: self.clock.now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, title: &str, contents: &str) -> Result<TodoRow, InfraError> {
        self.check_available()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(sqlx::Error::RowNotFound)?;
        row.title = title.to_string();
        row.contents = contents.to_string();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<Uuid, InfraError> {
        self.check_available()?;
        let mut rows = self.rows.lock().unwrap();
        let position = rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(rows.remove(position).id)
    }
}
