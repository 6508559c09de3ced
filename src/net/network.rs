//! 拓扑图存储
//!
//! 有向图：节点向量、链路向量、`(from, to) -> LinkId` 索引、每个节点的出边
//! 列表，以及节点名索引。

use std::collections::HashMap;
use std::net::Ipv4Addr;

use super::addr::MacAddr;
use super::bandwidth::Bandwidth;
use super::id::{LinkId, NodeId};
use super::link::Link;
use super::node::{Host, Node, Switch, SwitchLevel};
use tracing::trace;

/// 网络拓扑图
#[derive(Debug, Default, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    links: Vec<Link>,
    edges: HashMap<(NodeId, NodeId), LinkId>,
    out: Vec<Vec<LinkId>>,
    names: HashMap<String, NodeId>,
}

impl Network {
    /// 添加节点（通用入口，名称重复时返回 None）
    pub fn add_node(&mut self, node: Node) -> Option<NodeId> {
        let name = node.name();
        if self.names.contains_key(&name) {
            return None;
        }
        let id = NodeId(self.nodes.len());
        trace!(node = %name, id = id.0, "添加节点");
        self.nodes.push(node);
        self.out.push(Vec::new());
        self.names.insert(name, id);
        Some(id)
    }

    /// 添加主机节点
    ///
    /// # Panics
    ///
    /// 若同名节点 `h<index>` 已存在。
    pub fn add_host(&mut self, index: usize, mac: MacAddr, ip: Ipv4Addr) -> NodeId {
        self.add_node(Node::Host(Host { index, mac, ip }))
            .unwrap_or_else(|| panic!("duplicate host h{index}"))
    }

    /// 添加交换机节点
    ///
    /// # Panics
    ///
    /// 若同名节点 `s<index>` 已存在。
    pub fn add_switch(&mut self, index: usize, level: SwitchLevel) -> NodeId {
        self.add_node(Node::Switch(Switch { index, level }))
            .unwrap_or_else(|| panic!("duplicate switch s{index}"))
    }

    /// 修改交换机层级；`id` 不是交换机时返回 false
    pub fn set_switch_level(&mut self, id: NodeId, level: SwitchLevel) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(Node::Switch(s)) => {
                s.level = level;
                true
            }
            _ => false,
        }
    }

    /// 连接两个节点（创建单向链路）；`from -> to` 已存在时返回 None
    pub fn connect(
        &mut self,
        from: NodeId,
        to: NodeId,
        src_port: usize,
        dst_port: usize,
        capacity: Bandwidth,
        cost: u32,
    ) -> Option<LinkId> {
        if self.edges.contains_key(&(from, to)) {
            return None;
        }
        let id = LinkId(self.links.len());
        self.links
            .push(Link::new(from, to, src_port, dst_port, capacity, cost));
        self.edges.insert((from, to), id);
        self.out[from.0].push(id);
        Some(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// 按插入顺序遍历所有节点
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// 查找 `from -> to` 的有向链路
    pub fn link(&self, from: NodeId, to: NodeId) -> Option<&Link> {
        self.edges.get(&(from, to)).map(|id| &self.links[id.0])
    }

    /// `from` 的所有出边
    pub fn out_links(&self, from: NodeId) -> impl Iterator<Item = &Link> + '_ {
        self.out
            .get(from.0)
            .into_iter()
            .flatten()
            .map(|id| &self.links[id.0])
    }

    pub fn neighbors(&self, from: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_links(from).map(|l| l.to)
    }

    /// 按名称查找节点（如 `h1`、`s17`）
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// 所有缺少合法反向链路、或未被 `(from, to)` 索引的有向链路
    pub fn check_symmetric(&self) -> Vec<&Link> {
        self.links
            .iter()
            .enumerate()
            .filter(|&(i, l)| {
                let indexed = self.edges.get(&(l.from, l.to)) == Some(&LinkId(i));
                let reversed = self
                    .link(l.to, l.from)
                    .is_some_and(|rev| rev.is_reverse_of(l));
                !(indexed && reversed)
            })
            .map(|(_, l)| l)
            .collect()
    }
}
