//! # Todo インフラ層
//!
//! 外部システム（PostgreSQL）との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **ストアアダプタ**: 行単位のクエリ実行（[`store::TodoStore`]）
//! - **リポジトリ実装**: ストアの結果をドメインの結果に変換する唯一の場所
//!
//! ## 依存関係
//!
//! ```text
//! handler → repository → store → PostgreSQL
//! ```
//!
//! リポジトリはストアトレイトにのみ依存するため、
//! テストではインメモリストア（`test-utils` feature）に差し替えられる。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use todo_infra::{db, repository::TodoRepositoryImpl, store::PostgresTodoStore};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/todo", 10).await?;
//!     db::run_migrations(&pool).await?;
//!
//!     let repository = TodoRepositoryImpl::new(Arc::new(PostgresTodoStore::new(pool)));
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;
pub mod store;

pub use error::{InfraError, InfraErrorKind};
