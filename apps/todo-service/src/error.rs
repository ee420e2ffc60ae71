//! # Todo Service エラー定義
//!
//! ハンドラが返すエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | 種別 | ステータス | 本文 |
//! |------|-----------|------|
//! | [`ApiError::NotFound`] | 404 | エラーメッセージ |
//! | [`ApiError::Validation`] | 400 | エラーメッセージ |
//! | [`ApiError::Persistence`] | 500 | 固定メッセージ |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_domain::DomainError;
use todo_infra::{InfraError, InfraErrorKind, repository::TODO_ENTITY};
use todo_shared::ErrorResponse;

/// Todo Service で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リソースが見つからない
    #[error("{0}")]
    NotFound(String),

    /// リクエストの内容が不正
    #[error("{0}")]
    Validation(String),

    /// ストアの障害
    #[error("永続化エラー: {0}")]
    Persistence(InfraError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Todo ID として解釈できないパスパラメータ用の NotFound
    ///
    /// UUID でない値は一度も払い出されていないため、不在として扱う。
    pub fn todo_not_found(id: &str) -> Self {
        let kind = InfraErrorKind::NotFound {
            entity: TODO_ENTITY,
            id:     id.to_string(),
        };
        ApiError::NotFound(kind.to_string())
    }
}

impl From<InfraError> for ApiError {
    fn from(error: InfraError) -> Self {
        match error.kind() {
            InfraErrorKind::NotFound { .. } => ApiError::NotFound(error.to_string()),
            _ => ApiError::Persistence(error),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation(msg) => ApiError::Validation(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::NotFound(msg) | ApiError::Validation(msg) => ErrorResponse::single(msg),
            ApiError::Persistence(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "永続化エラー"
                );
                ErrorResponse::internal_error()
            }
        };

        (status, Json(body)).into_response()
    }
}
