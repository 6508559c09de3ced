//! Graphviz dot 输出
//!
//! ```text
//! digraph fattree {
//!     h1 [type=host, mac="00:00:00:00:00:01", ip="10.0.0.1"];
//!     s1 [type=switch, level=edge, id=1];
//!     s1 -> h1 [src_port=0, dst_port=0, capacity="1Gbps", cost=1];
//! }
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ExportError;
use crate::net::{Network, Node};

/// 按插入顺序写出全部节点与有向边
pub fn write_dot<W: Write>(net: &Network, mut w: W) -> io::Result<()> {
    writeln!(w, "digraph fattree {{")?;
    for (_, node) in net.nodes() {
        match node {
            Node::Host(h) => writeln!(
                w,
                "    {} [type=host, mac=\"{}\", ip=\"{}\"];",
                node.name(),
                h.mac,
                h.ip
            )?,
            Node::Switch(s) => writeln!(
                w,
                "    {} [type=switch, level={}, id={}];",
                node.name(),
                s.level,
                s.index
            )?,
        }
    }
    for link in net.links() {
        let (Some(from), Some(to)) = (net.node(link.from), net.node(link.to)) else {
            continue;
        };
        writeln!(
            w,
            "    {} -> {} [src_port={}, dst_port={}, capacity=\"{}\", cost={}];",
            from.name(),
            to.name(),
            link.src_port,
            link.dst_port,
            link.capacity,
            link.cost
        )?;
    }
    writeln!(w, "}}")?;
    w.flush()
}

pub fn to_dot_string(net: &Network) -> String {
    let mut buf = Vec::new();
    write_dot(net, &mut buf).expect("writing to Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}

/// 写出 `<root>.dot`，返回实际路径
pub fn write_dot_file(net: &Network, root: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
    let mut path = root.as_ref().as_os_str().to_owned();
    path.push(".dot");
    let path = PathBuf::from(path);

    let file = File::create(&path)?;
    write_dot(net, BufWriter::new(file))?;
    info!(path = %path.display(), "📝 写出 dot 文件");
    Ok(path)
}
