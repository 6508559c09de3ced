//! 链路类型
//!
//! 定义带端口号的有向链路。一条物理链路由两条方向相反、端口互换的
//! 有向链路表示。

use super::bandwidth::Bandwidth;
use super::id::NodeId;

/// 有向链路
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub from: NodeId,
    pub to: NodeId,
    /// `from` 一侧的端口号
    pub src_port: usize,
    /// `to` 一侧的端口号
    pub dst_port: usize,
    pub capacity: Bandwidth,
    pub cost: u32,
}

impl Link {
    /// 创建新链路
    pub fn new(
        from: NodeId,
        to: NodeId,
        src_port: usize,
        dst_port: usize,
        capacity: Bandwidth,
        cost: u32,
    ) -> Self {
        Self {
            from,
            to,
            src_port,
            dst_port,
            capacity,
            cost,
        }
    }

    /// `other` 是否恰好是本链路的反向：端点互换、端口互换、容量与代价相同
    pub fn is_reverse_of(&self, other: &Link) -> bool {
        self.from == other.to
            && self.to == other.from
            && self.src_port == other.dst_port
            && self.dst_port == other.src_port
            && self.capacity == other.capacity
            && self.cost == other.cost
    }
}
