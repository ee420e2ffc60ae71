//! # Todo Service ライブラリ
//!
//! Todo リソースの HTTP API を提供する。
//! バイナリ（`main.rs`）と OpenAPI 生成ツールから共有される。

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod openapi;
