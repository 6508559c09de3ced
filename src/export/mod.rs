//! 拓扑导出
//!
//! 构建完成的图只通过这里落盘：Graphviz dot 文本，以及可读回的 JSON 文档。

pub mod dot;
pub mod json;

pub use dot::{to_dot_string, write_dot, write_dot_file};
pub use json::{LinkDoc, NodeDoc, TopologyDoc, read_json, write_json};
