//! 网络拓扑图模块
//!
//! 此模块包含拓扑图的基础组件：节点、有向链路、带宽、地址派生和图存储。

// 子模块声明
mod addr;
mod bandwidth;
mod id;
mod link;
mod network;
mod node;

// 重新导出公共接口
pub use addr::{AddrError, MAX_ADDR_INDEX, MacAddr, ip_for, mac_for};
pub use bandwidth::{Bandwidth, BandwidthError};
pub use id::{LinkId, NodeId};
pub use link::Link;
pub use network::Network;
pub use node::{Host, Node, Switch, SwitchLevel};
