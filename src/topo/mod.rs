//! 拓扑构建
//!
//! 当前只提供 k 叉 fat-tree（Al-Fares et al.）。

pub mod fat_tree;
