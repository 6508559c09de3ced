//! JSON 拓扑文档
//!
//! 与 dot 输出携带相同的信息，但可以原样读回成 [`Network`]。

use std::fs;
use std::net::Ipv4Addr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ExportError;
use crate::net::{Bandwidth, Host, MacAddr, Network, Node, Switch, SwitchLevel};

/// 节点（按 `type` 区分 host/switch）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeDoc {
    Host {
        name: String,
        id: usize,
        mac: MacAddr,
        ip: Ipv4Addr,
    },
    Switch {
        name: String,
        id: usize,
        level: SwitchLevel,
    },
}

impl NodeDoc {
    pub fn name(&self) -> &str {
        match self {
            NodeDoc::Host { name, .. } | NodeDoc::Switch { name, .. } => name,
        }
    }
}

/// 有向边，端点用节点名引用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDoc {
    pub from: String,
    pub to: String,
    pub src_port: usize,
    pub dst_port: usize,
    pub capacity: Bandwidth,
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyDoc {
    pub nodes: Vec<NodeDoc>,
    pub links: Vec<LinkDoc>,
}

impl TopologyDoc {
    pub fn from_network(net: &Network) -> Self {
        let nodes = net
            .nodes()
            .map(|(_, node)| match node {
                Node::Host(h) => NodeDoc::Host {
                    name: node.name(),
                    id: h.index,
                    mac: h.mac,
                    ip: h.ip,
                },
                Node::Switch(s) => NodeDoc::Switch {
                    name: node.name(),
                    id: s.index,
                    level: s.level,
                },
            })
            .collect();
        let name_of = |id| net.node(id).map(Node::name).unwrap_or_default();
        let links = net
            .links()
            .iter()
            .map(|l| LinkDoc {
                from: name_of(l.from),
                to: name_of(l.to),
                src_port: l.src_port,
                dst_port: l.dst_port,
                capacity: l.capacity.clone(),
                cost: l.cost,
            })
            .collect();
        Self { nodes, links }
    }

    /// 重建图。节点名必须等于由 `id` 派生的名称，否则无法原样读回。
    pub fn into_network(self) -> Result<Network, ExportError> {
        let mut net = Network::default();
        for doc in self.nodes {
            let name = doc.name().to_string();
            let node = match doc {
                NodeDoc::Host { id, mac, ip, .. } => Node::Host(Host { index: id, mac, ip }),
                NodeDoc::Switch { id, level, .. } => Node::Switch(Switch { index: id, level }),
            };
            let expected = node.name();
            if name != expected {
                return Err(ExportError::NameMismatch { name, expected });
            }
            net.add_node(node)
                .ok_or(ExportError::DuplicateNode(name))?;
        }
        for link in self.links {
            let from = net
                .find(&link.from)
                .ok_or_else(|| ExportError::UnknownNode(link.from.clone()))?;
            let to = net
                .find(&link.to)
                .ok_or_else(|| ExportError::UnknownNode(link.to.clone()))?;
            net.connect(from, to, link.src_port, link.dst_port, link.capacity, link.cost)
                .ok_or(ExportError::DuplicateLink {
                    from: link.from,
                    to: link.to,
                })?;
        }
        Ok(net)
    }
}

pub fn write_json(net: &Network, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let doc = TopologyDoc::from_network(net);
    fs::write(path, serde_json::to_vec_pretty(&doc)?)?;
    info!(path = %path.display(), "📝 写出 json 文件");
    Ok(())
}

pub fn read_json(path: impl AsRef<Path>) -> Result<Network, ExportError> {
    let raw = fs::read_to_string(path)?;
    let doc: TopologyDoc = serde_json::from_str(&raw)?;
    doc.into_network()
}
