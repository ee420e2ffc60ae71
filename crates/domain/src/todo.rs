//! # Todo
//!
//! Todo リソースのエンティティと値オブジェクト。
//!
//! ## ライフサイクル
//!
//! - 作成: [`TodoDraft`] をストアに渡し、ID と作成日時はストアが採番する
//! - 参照: ストアの行から [`Todo::from_db`] で復元する
//! - 更新: タイトルと内容のみ変更可能。ID と作成日時は変わらない
//! - 削除: 以降の参照は NotFound になる
//!
//! [`Todo`] はストアから復元する以外に生成手段を持たない。
//! 永続化前の Todo に ID が存在しないことを型で保証するため。

use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::Display;
use uuid::Uuid;

use crate::DomainError;

/// タイトルの最大文字数（DB: `VARCHAR(255)`）
pub const MAX_TODO_TITLE_LENGTH: usize = 255;

/// Todo の一意識別子
///
/// ストアが採番する。一度払い出された ID は再利用されない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct TodoId(Uuid);

impl TodoId {
    /// 新しい ID を生成する（UUID v7）
    ///
    /// ID を自前で採番するストア実装のみが使用する。
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 既存の UUID から ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部の UUID 参照を取得する
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

// =========================================================================
// TodoTitle（タイトル）
// =========================================================================

/// Todo のタイトル（値オブジェクト）
///
/// # 不変条件
///
/// - 空白以外の文字を 1 文字以上含む
/// - 最大 255 文字
///
/// 値は入力のまま保持する（前後の空白も含む）。
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{_0}")]
pub struct TodoTitle(String);

impl TodoTitle {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::Validation("タイトルは必須です".to_string()));
        }

        if value.chars().count() > MAX_TODO_TITLE_LENGTH {
            return Err(DomainError::Validation(format!(
                "タイトルは {MAX_TODO_TITLE_LENGTH} 文字以内である必要があります"
            )));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =========================================================================
// TodoDraft（作成・更新の入力）
// =========================================================================

/// 作成・更新で渡す Todo の可変部分
///
/// ID と作成日時のフィールドを持たないため、呼び出し側がそれらを指定しても
/// ストアには届かない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    title:    TodoTitle,
    contents: String,
}

impl TodoDraft {
    /// タイトルを検証して下書きを作成する
    ///
    /// 内容は空文字列を許容する。
    pub fn new(title: impl Into<String>, contents: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self {
            title:    TodoTitle::new(title)?,
            contents: contents.into(),
        })
    }

    pub fn title(&self) -> &TodoTitle {
        &self.title
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}

// =========================================================================
// Todo（エンティティ）
// =========================================================================

/// 永続化済みの Todo
///
/// # 不変条件
///
/// - `id` はストア内で一意
/// - `created_at` は作成時に一度だけ設定される
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id:         TodoId,
    title:      TodoTitle,
    contents:   String,
    created_at: DateTime<Utc>,
}

impl Todo {
    /// データベースから Todo を復元する
    pub fn from_db(
        id: TodoId,
        title: TodoTitle,
        contents: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            contents,
            created_at,
        }
    }

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn title(&self) -> &TodoTitle {
        &self.title
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
