//! # Todo ドメイン層
//!
//! Todo リソースのドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! todo-service → infra → domain
//!       ↘          ↓
//!          shared
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`todo`] - Todo エンティティと値オブジェクト
//! - [`clock`] - 時刻プロバイダ
//!
//! ## 使用例
//!
//! ```rust
//! use todo_domain::todo::TodoDraft;
//!
//! let draft = TodoDraft::new("buy milk", "2%").unwrap();
//! assert_eq!(draft.title().as_str(), "buy milk");
//!
//! assert!(TodoDraft::new("   ", "2%").is_err());
//! ```

pub mod clock;
pub mod error;
pub mod todo;

pub use error::DomainError;
