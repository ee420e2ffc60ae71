//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 形式
//!
//! ```json
//! { "errors": [{ "message": "Todo が見つかりません: ..." }] }
//! ```
//!
//! - 原因に関わらず、失敗レスポンスは必ずこの形を取る
//! - axum の `IntoResponse` 変換はサービスの責務（shared に axum 依存を入れない）

use serde::{Deserialize, Serialize};

/// 500 系で返す固定メッセージ（内部情報を漏らさない）
pub const INTERNAL_ERROR_MESSAGE: &str = "内部エラーが発生しました";

/// エラー 1 件分のメッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorMessage {
    pub message: String,
}

/// エラーレスポンス
///
/// `errors` は 1 件以上のメッセージを持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    pub errors: Vec<ErrorMessage>,
}

impl ErrorResponse {
    /// 複数メッセージからレスポンスを作成する
    pub fn new<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            errors: messages
                .into_iter()
                .map(|message| ErrorMessage {
                    message: message.into(),
                })
                .collect(),
        }
    }

    /// メッセージ 1 件のレスポンスを作成する
    pub fn single(message: impl Into<String>) -> Self {
        Self::new([message])
    }

    /// 500 Internal Server Error 用のレスポンス
    pub fn internal_error() -> Self {
        Self::single(INTERNAL_ERROR_MESSAGE)
    }

    /// 先頭のメッセージを返す
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}


#[cfg(all(test, feature = "openapi"))]
mod openapi_tests {
    use utoipa::PartialSchema;

    use super::*;

    #[test]
    fn test_error_responseにtoschemaが実装されている() {
        let schema = ErrorResponse::schema();
        let utoipa::openapi::RefOr::T(utoipa::openapi::Schema::Object(obj)) = schema else {
            panic!("expected inline object schema");
        };
        assert!(obj.properties.contains_key("errors"));
    }
}
