use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fattree_rs::export::{write_dot, write_dot_file, write_json};
use fattree_rs::topo::fat_tree::{FatTreeOpts, build_fat_tree};
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "fat-tree",
    about = "Generate a k-ary fat-tree topology in dot notation"
)]
struct Args {
    /// Number of pods (parameter k in the paper)
    #[arg(short, long, default_value_t = 4)]
    pods: usize,

    /// Bandwidth of each link
    #[arg(short, long, default_value = "1Gbps")]
    bandwidth: String,

    /// File root to write to (writes <root>.dot); prints to stdout if absent
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Also write the topology as a JSON document
    #[arg(long)]
    json: Option<PathBuf>,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let opts = FatTreeOpts {
        k: args.pods,
        bandwidth: args.bandwidth.clone(),
    };
    let topo = build_fat_tree(&opts)?;
    let net = topo.network();

    match &args.out {
        Some(root) => {
            write_dot_file(net, root)?;
        }
        None => write_dot(net, io::stdout().lock())?,
    }
    if let Some(path) = &args.json {
        write_json(net, path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "fat-tree generation failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
