//! Fat-tree 拓扑构建
//!
//! 按 Al-Fares 等人的三层 k 叉 fat-tree 生成带端口号的有向图：
//!
//! - 主机 `k³/4` 台，编号 `h1..`
//! - 汇聚池 `k²` 台交换机（`s1..=s{k²}`），每个 pod 连续 `k` 台：
//!   前 `k/2` 台为 edge，后 `k/2` 台为 aggregation
//! - 核心 `k²/4` 台交换机，编号紧随汇聚池
//!
//! 端口约定（每台交换机 `k` 个端口）：
//!
//! - edge：`0..k/2` 接主机，`k/2..k` 接同 pod 的 aggregation（端口号 = 对端槽位）
//! - aggregation：`0..k/2` 接同 pod 的 edge（端口号 = 对端槽位），`k/2..k` 接核心
//! - core：端口号 = pod 编号
//! - host：唯一上联端口 0

use tracing::{debug, info};

use crate::error::TopoError;
use crate::net::{Bandwidth, Network, Node, NodeId, SwitchLevel, ip_for, mac_for};

/// 所有链路的代价
pub const LINK_COST: u32 = 1;

#[derive(Debug, Clone)]
pub struct FatTreeOpts {
    /// pod 数（论文中的 k），必须为正偶数
    pub k: usize,
    /// 每条链路的带宽字符串，例如 `1Gbps`
    pub bandwidth: String,
}

impl Default for FatTreeOpts {
    fn default() -> Self {
        Self {
            k: 4,
            bandwidth: "1Gbps".to_string(),
        }
    }
}

/// 由 k 推导出的各类节点数量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FatTreeCounts {
    pub k: usize,
    /// `k³/4`
    pub hosts: usize,
    /// `k²`，同时提供 edge 与 aggregation 两种角色
    pub agg_pool: usize,
    /// `k²/4`
    pub core: usize,
}

impl FatTreeCounts {
    /// 校验 k 并计算数量；k 为 0、奇数或过大时报错
    pub fn for_pods(k: usize) -> Result<Self, TopoError> {
        if k == 0 || k % 2 != 0 {
            return Err(TopoError::InvalidPods(k));
        }
        let k2 = k.checked_mul(k).ok_or(TopoError::TooLarge(k))?;
        let k3 = k2.checked_mul(k).ok_or(TopoError::TooLarge(k))?;
        Ok(Self {
            k,
            hosts: k3 / 4,
            agg_pool: k2,
            core: k2 / 4,
        })
    }

    pub fn half(&self) -> usize {
        self.k / 2
    }

    pub fn edge_switches(&self) -> usize {
        self.k * self.half()
    }

    pub fn agg_switches(&self) -> usize {
        self.k * self.half()
    }

    pub fn switches(&self) -> usize {
        self.agg_pool + self.core
    }

    pub fn nodes(&self) -> usize {
        self.hosts + self.switches()
    }

    /// 物理链路数：host-edge、edge-agg、agg-core 三层各 `k³/4` 条
    pub fn physical_links(&self) -> usize {
        3 * self.hosts
    }

    /// 有向边数（每条物理链路两条）
    pub fn directed_links(&self) -> usize {
        2 * self.physical_links()
    }
}

#[derive(Debug, Clone)]
pub struct FatTreeTopology {
    pub k: usize,
    pub hosts: Vec<NodeId>,
    pub edge_switches: Vec<NodeId>,
    pub agg_switches: Vec<NodeId>,
    pub core_switches: Vec<NodeId>,
    net: Network,
}

impl FatTreeTopology {
    fn half(&self) -> usize {
        self.k / 2
    }

    /// 构建完成的拓扑图（只读）
    pub fn network(&self) -> &Network {
        &self.net
    }

    pub fn into_network(self) -> Network {
        self.net
    }

    pub fn host(&self, pod: usize, edge: usize, host: usize) -> NodeId {
        let half = self.half();
        let idx = (pod * half + edge) * half + host;
        self.hosts[idx]
    }

    pub fn edge(&self, pod: usize, edge: usize) -> NodeId {
        let half = self.half();
        let idx = pod * half + edge;
        self.edge_switches[idx]
    }

    pub fn agg(&self, pod: usize, agg: usize) -> NodeId {
        let half = self.half();
        let idx = pod * half + agg;
        self.agg_switches[idx]
    }

    pub fn core(&self, index: usize) -> NodeId {
        self.core_switches[index]
    }

    /// 节点所属 pod；核心交换机与未知节点返回 None
    pub fn pod_of(&self, id: NodeId) -> Option<usize> {
        let half = self.half();
        match self.net.node(id)? {
            Node::Host(h) => Some((h.index - 1) / (half * half)),
            Node::Switch(s) if s.level == SwitchLevel::Core => None,
            Node::Switch(s) => Some((s.index - 1) / self.k),
        }
    }
}

/// 一条物理链路 = 两条端口互换的有向边
fn link_pair(
    net: &mut Network,
    a: NodeId,
    b: NodeId,
    a_port: usize,
    b_port: usize,
    bw: &Bandwidth,
) {
    // 每对节点只接线一次
    net.connect(a, b, a_port, b_port, bw.clone(), LINK_COST)
        .expect("fat-tree wiring connects each pair once");
    net.connect(b, a, b_port, a_port, bw.clone(), LINK_COST)
        .expect("fat-tree wiring connects each pair once");
}

/// 本 pod 的 aggregation 交换机上联核心层。
///
/// `core_offset` 每个 pod 从 0 开始，每处理一个 (交换机, 端口) 前进一步，
/// 因此每个 pod 恰好把每台核心交换机用一次。
fn wire_core(
    net: &mut Network,
    agg_pool: &[NodeId],
    core_switches: &[NodeId],
    pod: usize,
    k: usize,
    bw: &Bandwidth,
) {
    let half = k / 2;
    let mut core_offset = 0;
    for slot in half..k {
        let switch = agg_pool[pod * k + slot];
        for port in half..k {
            let core = core_switches[core_offset];
            link_pair(net, switch, core, port, pod, bw);
            core_offset += 1;
        }
    }
    debug!(pod, links = core_offset, "核心层接线完成");
}

/// 本 pod 内 aggregation 与 edge 全连接
fn wire_aggregation(
    net: &mut Network,
    agg_pool: &[NodeId],
    pod: usize,
    k: usize,
    bw: &Bandwidth,
) {
    let half = k / 2;
    for slot in half..k {
        let switch = agg_pool[pod * k + slot];
        for port in 0..half {
            let lower = agg_pool[pod * k + port];
            link_pair(net, switch, lower, port, slot, bw);
        }
    }
}

/// 本 pod 的 edge 交换机按顺序挂接主机；`host_offset` 跨 pod 累加，从不重置
fn wire_hosts(
    net: &mut Network,
    agg_pool: &[NodeId],
    hosts: &[NodeId],
    host_offset: &mut usize,
    pod: usize,
    k: usize,
    bw: &Bandwidth,
) {
    let half = k / 2;
    for slot in 0..half {
        let switch = agg_pool[pod * k + slot];
        for port in 0..half {
            let host = hosts[*host_offset];
            link_pair(net, switch, host, port, 0, bw);
            *host_offset += 1;
        }
    }
}

#[tracing::instrument(skip(opts), fields(k = opts.k, bandwidth = %opts.bandwidth))]
pub fn build_fat_tree(opts: &FatTreeOpts) -> Result<FatTreeTopology, TopoError> {
    let counts = FatTreeCounts::for_pods(opts.k)?;
    let bw = Bandwidth::parse(&opts.bandwidth)?;

    // 地址派生单调：最大下标可用则全部可用，在创建任何节点前先探测。
    mac_for(counts.hosts)?;
    ip_for(counts.hosts)?;

    let k = counts.k;
    let half = counts.half();
    info!(
        hosts = counts.hosts,
        agg_pool = counts.agg_pool,
        core = counts.core,
        "🌲 构建 fat-tree"
    );

    let mut net = Network::default();

    let mut hosts = Vec::with_capacity(counts.hosts);
    for index in 1..=counts.hosts {
        hosts.push(net.add_host(index, mac_for(index)?, ip_for(index)?));
    }

    let agg_pool: Vec<NodeId> = (1..=counts.agg_pool)
        .map(|index| net.add_switch(index, SwitchLevel::Aggregation))
        .collect();

    let core_start = counts.agg_pool + 1;
    let core_switches: Vec<NodeId> = (core_start..core_start + counts.core)
        .map(|index| net.add_switch(index, SwitchLevel::Core))
        .collect();

    // 每个 pod 的前 k/2 台改为 edge
    let mut edge_switches = Vec::with_capacity(counts.edge_switches());
    let mut agg_switches = Vec::with_capacity(counts.agg_switches());
    for pod in 0..k {
        for slot in 0..k {
            let id = agg_pool[pod * k + slot];
            if slot < half {
                net.set_switch_level(id, SwitchLevel::Edge);
                edge_switches.push(id);
            } else {
                agg_switches.push(id);
            }
        }
    }
    debug!(edge = edge_switches.len(), aggregation = agg_switches.len(), "角色划分完成");

    let mut host_offset = 0;
    for pod in 0..k {
        wire_core(&mut net, &agg_pool, &core_switches, pod, k, &bw);
        wire_aggregation(&mut net, &agg_pool, pod, k, &bw);
        wire_hosts(&mut net, &agg_pool, &hosts, &mut host_offset, pod, k, &bw);
        debug!(pod, host_offset, "pod 接线完成");
    }

    info!(
        nodes = net.node_count(),
        links = net.link_count(),
        "✅ fat-tree 构建完成"
    );

    Ok(FatTreeTopology {
        k,
        hosts,
        edge_switches,
        agg_switches,
        core_switches,
        net,
    })
}
