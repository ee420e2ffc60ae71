//! # インフラ層エラー定義
//!
//! データベースとの通信で発生するエラーと、リポジトリが判定した
//! 「エンティティが存在しない」を表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別
//!
//! ## 種別の判定
//!
//! 呼び出し側はメッセージ文字列ではなく種別で判定する:
//!
//! ```ignore
//! match error.kind() {
//!     InfraErrorKind::NotFound { .. } => { /* 404 */ }
//!     _ => { /* 500 */ }
//! }
//! ```

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// `From<sqlx::Error>` や convenience constructor でエラーを生成すると、
/// その時点のスパン情報が [`SpanTrace`] として自動的にキャプチャされる。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベースエラー
    ///
    /// 接続失敗、SQL の実行失敗、制約違反など。
    /// ストアが「該当行なし」を報告した場合も、リポジトリが変換するまではこの種別になる。
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// エンティティが存在しない
    ///
    /// リポジトリがストアの「該当行なし」を変換した結果。
    #[error("{entity} が見つかりません: {id}")]
    NotFound {
        /// エンティティ名（例: "Todo"）
        entity: &'static str,
        /// 検索に使用した ID
        id:     String,
    },

    /// 予期しないエラー
    ///
    /// DB に格納された値がドメインの制約を満たさない場合など。
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// エンティティ不在エラーかどうか
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, InfraErrorKind::NotFound { .. })
    }

    /// NotFound バリアントの場合、entity と id を返す
    pub fn as_not_found(&self) -> Option<(&'static str, &str)> {
        match &self.kind {
            InfraErrorKind::NotFound { entity, id } => Some((*entity, id.as_str())),
            _ => None,
        }
    }

    /// ストアが「該当行なし」を報告したかどうか
    ///
    /// sqlx は `fetch_one` で行が得られなかった場合に `RowNotFound` を返す。
    /// リポジトリはこの判定で NotFound への変換を行う。
    pub fn is_row_not_found(&self) -> bool {
        matches!(self.kind, InfraErrorKind::Database(sqlx::Error::RowNotFound))
    }

    // ===== Convenience constructors =====

    /// エンティティ不在エラーを生成する
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::NotFound {
                entity,
                id: id.into(),
            },
            span_trace: SpanTrace::capture(),
        }
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Database(source),
            span_trace: SpanTrace::capture(),
        }
    }
}
