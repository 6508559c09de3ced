//! 错误类型
//!
//! 拓扑构建与导出两个阶段各自的错误枚举。

use thiserror::Error;

use crate::net::{AddrError, BandwidthError};

/// 拓扑构建错误
#[derive(Debug, Error)]
pub enum TopoError {
    /// pods 必须是正偶数
    #[error("invalid fat-tree parameter: pods must be a positive even integer, got {0}")]
    InvalidPods(usize),

    #[error("fat-tree with {0} pods is too large to build")]
    TooLarge(usize),

    #[error(transparent)]
    Address(#[from] AddrError),

    #[error(transparent)]
    Bandwidth(#[from] BandwidthError),
}

/// 导出/导入错误
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// 边引用了文档中不存在的节点
    #[error("link references unknown node {0:?}")]
    UnknownNode(String),

    #[error("duplicate node {0:?}")]
    DuplicateNode(String),

    /// 节点名必须与由 `id` 派生的名称一致
    #[error("node {name:?} does not match its id (expected {expected:?})")]
    NameMismatch { name: String, expected: String },

    #[error("duplicate link {from:?} -> {to:?}")]
    DuplicateLink { from: String, to: String },
}
