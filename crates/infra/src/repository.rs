//! # リポジトリ実装
//!
//! ドメイン操作とストアの間を仲介する。
//!
//! ## 設計方針
//!
//! - **唯一の解釈点**: ストアの成功・失敗を解釈するのはリポジトリだけ
//! - **種別による判定**: 「該当行なし」は `InfraErrorKind::NotFound` に変換し、
//!   それ以外の失敗は変更せずに返す
//! - **テスタビリティ**: ストアはトレイト経由で注入する

pub mod todo_repository;

pub use todo_repository::{TODO_ENTITY, TodoRepository, TodoRepositoryImpl};
