use crate::error::TopoError;
use crate::net::{Network, NodeId, SwitchLevel};
use crate::topo::fat_tree::{FatTreeCounts, FatTreeOpts, FatTreeTopology, build_fat_tree};
use std::collections::HashSet;

fn build(k: usize) -> FatTreeTopology {
    let opts = FatTreeOpts {
        k,
        ..FatTreeOpts::default()
    };
    build_fat_tree(&opts).expect("valid fat-tree")
}

fn level(net: &Network, id: NodeId) -> Option<SwitchLevel> {
    net.node(id).and_then(|n| n.level())
}

#[test]
fn fat_tree_counts_follow_pod_parameter() {
    let c = FatTreeCounts::for_pods(4).expect("k=4");
    assert_eq!(c.hosts, 16);
    assert_eq!(c.agg_pool, 16);
    assert_eq!(c.core, 4);
    assert_eq!(c.edge_switches(), 8);
    assert_eq!(c.agg_switches(), 8);
    assert_eq!(c.nodes(), 36);
    assert_eq!(c.directed_links(), 96);

    let c = FatTreeCounts::for_pods(8).expect("k=8");
    assert_eq!(c.hosts, 128);
    assert_eq!(c.agg_pool, 64);
    assert_eq!(c.core, 16);
}

#[test]
fn fat_tree_k4_scenario() {
    let topo = build(4);
    let net = topo.network();

    assert_eq!(topo.hosts.len(), 16);
    assert_eq!(topo.edge_switches.len(), 8);
    assert_eq!(topo.agg_switches.len(), 8);
    assert_eq!(topo.core_switches.len(), 4);
    assert_eq!(net.node_count(), 36);
    assert_eq!(net.link_count(), 96);

    for pod in 0..4 {
        let edges = topo
            .edge_switches
            .iter()
            .filter(|&&id| topo.pod_of(id) == Some(pod))
            .count();
        let aggs = topo
            .agg_switches
            .iter()
            .filter(|&&id| topo.pod_of(id) == Some(pod))
            .count();
        assert_eq!((edges, aggs), (2, 2), "pod {pod}");
    }

    let mut seen_hosts = HashSet::new();
    for pod in 0..4 {
        for edge in 0..2 {
            for host in 0..2 {
                let hid = topo.host(pod, edge, host);
                assert!(seen_hosts.insert(hid), "duplicate host id {hid:?}");
                assert_eq!(topo.pod_of(hid), Some(pod));
            }
        }
    }
    assert_eq!(seen_hosts.len(), topo.hosts.len());
}

#[test]
fn fat_tree_names_and_addresses() {
    let topo = build(4);
    let net = topo.network();

    let h1 = net.node(topo.host(0, 0, 0)).expect("h1");
    assert_eq!(h1.name(), "h1");
    let h1 = h1.as_host().expect("host");
    assert_eq!(h1.mac.to_string(), "00:00:00:00:00:01");
    assert_eq!(h1.ip.to_string(), "10.0.0.1");

    let last = net.node(topo.host(3, 1, 1)).expect("h16");
    assert_eq!(last.name(), "h16");

    // 汇聚池 s1..=s16，核心 s17..=s20
    assert_eq!(net.node(topo.edge(0, 0)).unwrap().name(), "s1");
    assert_eq!(net.node(topo.agg(0, 0)).unwrap().name(), "s3");
    assert_eq!(net.node(topo.edge(1, 0)).unwrap().name(), "s5");
    assert_eq!(net.node(topo.core(0)).unwrap().name(), "s17");
    assert_eq!(net.node(topo.core(3)).unwrap().name(), "s20");
    assert_eq!(net.find("s20"), Some(topo.core(3)));
}

#[test]
fn fat_tree_port_assignment_k4() {
    let topo = build(4);
    let net = topo.network();

    // pod 1 的第二台 aggregation（槽位 3）使用核心 2、3，上联端口 2、3，核心侧端口 = pod
    let agg = topo.agg(1, 1);
    let l = net.link(agg, topo.core(2)).expect("agg -> core2");
    assert_eq!((l.src_port, l.dst_port), (2, 1));
    let l = net.link(agg, topo.core(3)).expect("agg -> core3");
    assert_eq!((l.src_port, l.dst_port), (3, 1));
    assert!(net.link(agg, topo.core(0)).is_none());

    // aggregation 下联端口 = edge 槽位，edge 上联端口 = aggregation 槽位
    let l = net.link(topo.agg(0, 0), topo.edge(0, 1)).expect("agg -> edge");
    assert_eq!((l.src_port, l.dst_port), (1, 2));
    let l = net.link(topo.edge(0, 1), topo.agg(0, 1)).expect("edge -> agg");
    assert_eq!((l.src_port, l.dst_port), (3, 1));

    // 主机侧端口固定为 0
    let l = net.link(topo.edge(0, 1), topo.host(0, 1, 1)).expect("edge -> host");
    assert_eq!((l.src_port, l.dst_port), (1, 0));
    let l = net.link(topo.host(0, 1, 1), topo.edge(0, 1)).expect("host -> edge");
    assert_eq!((l.src_port, l.dst_port), (0, 1));
    assert_eq!(l.capacity.as_str(), "1Gbps");
    assert_eq!(l.cost, 1);
}

fn check_fat_tree_invariants(k: usize) {
    let half = k / 2;
    let counts = FatTreeCounts::for_pods(k).expect("valid k");
    let topo = build(k);
    let net = topo.network();

    assert_eq!(net.node_count(), k * k * k / 4 + k * k + k * k / 4, "k={k}");
    assert_eq!(net.link_count(), counts.directed_links(), "k={k}");
    assert!(net.check_symmetric().is_empty(), "k={k}: asymmetric links");

    let mut by_level = [0usize; 3];
    let mut macs = HashSet::new();
    let mut ips = HashSet::new();
    for (id, node) in net.nodes() {
        match node.level() {
            None => {
                let h = node.as_host().expect("host");
                assert!(macs.insert(h.mac), "duplicate mac {}", h.mac);
                assert!(ips.insert(h.ip), "duplicate ip {}", h.ip);
            }
            Some(SwitchLevel::Edge) => by_level[0] += 1,
            Some(SwitchLevel::Aggregation) => by_level[1] += 1,
            Some(SwitchLevel::Core) => by_level[2] += 1,
        }
        let nbrs: Vec<NodeId> = net.neighbors(id).collect();
        let distinct: HashSet<NodeId> = nbrs.iter().copied().collect();
        assert_eq!(nbrs.len(), distinct.len(), "k={k}: parallel links at {id:?}");
    }
    assert_eq!(by_level, [k * half, k * half, k * k / 4], "k={k}");
    assert_eq!(macs.len(), counts.hosts);

    for &host in &topo.hosts {
        let up: Vec<_> = net.out_links(host).collect();
        assert_eq!(up.len(), 1, "k={k}: host uplinks");
        assert_eq!(up[0].src_port, 0);
        assert_eq!(level(net, up[0].to), Some(SwitchLevel::Edge));
    }

    let all_ports: HashSet<usize> = (0..k).collect();

    for &edge in &topo.edge_switches {
        let pod = topo.pod_of(edge);
        let links: Vec<_> = net.out_links(edge).collect();
        let to_hosts = links.iter().filter(|l| level(net, l.to).is_none()).count();
        let to_aggs = links
            .iter()
            .filter(|l| level(net, l.to) == Some(SwitchLevel::Aggregation))
            .filter(|l| topo.pod_of(l.to) == pod)
            .count();
        assert_eq!((to_hosts, to_aggs, links.len()), (half, half, k), "k={k}");
        let ports: HashSet<usize> = links.iter().map(|l| l.src_port).collect();
        assert_eq!(ports, all_ports, "k={k}: edge ports");
    }

    for &agg in &topo.agg_switches {
        let pod = topo.pod_of(agg);
        let links: Vec<_> = net.out_links(agg).collect();
        let to_edges = links
            .iter()
            .filter(|l| level(net, l.to) == Some(SwitchLevel::Edge))
            .filter(|l| topo.pod_of(l.to) == pod)
            .count();
        let to_cores = links
            .iter()
            .filter(|l| level(net, l.to) == Some(SwitchLevel::Core))
            .count();
        assert_eq!((to_edges, to_cores, links.len()), (half, half, k), "k={k}");
        let ports: HashSet<usize> = links.iter().map(|l| l.src_port).collect();
        assert_eq!(ports, all_ports, "k={k}: aggregation ports");
    }

    for &core in &topo.core_switches {
        let links: Vec<_> = net.out_links(core).collect();
        assert_eq!(links.len(), k, "k={k}: core degree");
        let pods: HashSet<Option<usize>> = links.iter().map(|l| topo.pod_of(l.to)).collect();
        assert_eq!(pods, (0..k).map(Some).collect::<HashSet<_>>(), "k={k}: one link per pod");
        let ports: HashSet<usize> = links.iter().map(|l| l.src_port).collect();
        assert_eq!(ports, all_ports, "k={k}: core ports");
        assert!(
            links
                .iter()
                .all(|l| level(net, l.to) == Some(SwitchLevel::Aggregation))
        );
    }
}

#[test]
fn fat_tree_invariants_hold_for_several_k() {
    for k in [2, 4, 6, 8] {
        check_fat_tree_invariants(k);
    }
}

#[test]
fn fat_tree_build_is_deterministic() {
    let a = build(6);
    let b = build(6);
    let nodes_a: Vec<_> = a.network().nodes().map(|(_, n)| n.clone()).collect();
    let nodes_b: Vec<_> = b.network().nodes().map(|(_, n)| n.clone()).collect();
    assert_eq!(nodes_a, nodes_b);
    assert_eq!(a.network().links(), b.network().links());
}

#[test]
fn fat_tree_uses_requested_bandwidth() {
    let opts = FatTreeOpts {
        k: 4,
        bandwidth: "10Gbps".to_string(),
    };
    let topo = build_fat_tree(&opts).expect("valid");
    assert!(
        topo.network()
            .links()
            .iter()
            .all(|l| l.capacity.as_str() == "10Gbps" && l.capacity.bps() == 10_000_000_000)
    );
}

#[test]
fn fat_tree_rejects_bad_parameters() {
    for k in [0, 1, 3, 7] {
        let opts = FatTreeOpts {
            k,
            ..FatTreeOpts::default()
        };
        assert!(
            matches!(build_fat_tree(&opts), Err(TopoError::InvalidPods(bad)) if bad == k),
            "k={k} should be rejected"
        );
    }

    let opts = FatTreeOpts {
        k: usize::MAX - 1,
        ..FatTreeOpts::default()
    };
    assert!(matches!(build_fat_tree(&opts), Err(TopoError::TooLarge(_))));

    let opts = FatTreeOpts {
        k: 4,
        bandwidth: "fast".to_string(),
    };
    assert!(matches!(build_fat_tree(&opts), Err(TopoError::Bandwidth(_))));
}

#[test]
fn fat_tree_address_exhaustion_fails_before_building() {
    // 408³/4 台主机超出 10.0.0.0/8
    let opts = FatTreeOpts {
        k: 408,
        ..FatTreeOpts::default()
    };
    assert!(matches!(build_fat_tree(&opts), Err(TopoError::Address(_))));
}
