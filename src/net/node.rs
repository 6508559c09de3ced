//! 节点类型
//!
//! 节点是主机与交换机的和类型，各自只携带属于自己角色的属性：
//! 主机没有层级，交换机没有地址。

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::addr::MacAddr;

/// 交换机所在层级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchLevel {
    Edge,
    Aggregation,
    Core,
}

impl SwitchLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            SwitchLevel::Edge => "edge",
            SwitchLevel::Aggregation => "aggregation",
            SwitchLevel::Core => "core",
        }
    }
}

impl fmt::Display for SwitchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 主机节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub index: usize,
    pub mac: MacAddr,
    pub ip: Ipv4Addr,
}

/// 交换机节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switch {
    pub index: usize,
    pub level: SwitchLevel,
}

/// 拓扑节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Host(Host),
    Switch(Switch),
}

impl Node {
    /// 节点名称：主机 `h<index>`，交换机 `s<index>`
    pub fn name(&self) -> String {
        match self {
            Node::Host(h) => format!("h{}", h.index),
            Node::Switch(s) => format!("s{}", s.index),
        }
    }

    pub fn as_host(&self) -> Option<&Host> {
        match self {
            Node::Host(h) => Some(h),
            Node::Switch(_) => None,
        }
    }

    pub fn as_switch(&self) -> Option<&Switch> {
        match self {
            Node::Switch(s) => Some(s),
            Node::Host(_) => None,
        }
    }

    /// 交换机层级；主机返回 None
    pub fn level(&self) -> Option<SwitchLevel> {
        self.as_switch().map(|s| s.level)
    }
}
