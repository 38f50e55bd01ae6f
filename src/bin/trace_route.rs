//! 单包路径追踪
//!
//! 只依据下发的路由表，逐跳打印从源主机到目的 IP 的路径。

use std::net::Ipv4Addr;
use std::process::ExitCode;

use clap::Parser;
use fattree_ctl::addr::parse_host_name;
use fattree_ctl::config::LinkPreset;
use fattree_ctl::routing::RoutingPlan;
use fattree_ctl::topo::TopologyModel;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "trace-route", about = "按两级路由表追踪一个包的转发路径")]
struct Args {
    #[arg(long, default_value_t = 4)]
    k: i64,
    /// 源主机名，如 p0_s0_h2
    #[arg(long)]
    src: String,
    /// 目的 IP，如 10.3.1.3
    #[arg(long)]
    dst: Ipv4Addr,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let src = match parse_host_name(&args.src) {
        Ok(src) => src,
        Err(e) => {
            error!(error = %e, "源主机名无效");
            return ExitCode::FAILURE;
        }
    };
    let topo = match TopologyModel::build_with(args.k, LinkPreset::Default.profiles()) {
        Ok(topo) => topo,
        Err(e) => {
            error!(error = %e, "构建拓扑失败");
            return ExitCode::FAILURE;
        }
    };

    let plan = RoutingPlan::build(&topo);
    match plan.trace(src, args.dst) {
        Ok(path) => {
            for hop in &path {
                match hop.out_port {
                    Some(port) => println!("{} -> port {}", hop.node, port),
                    None => println!("{}", hop.node),
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "路径追踪失败");
            ExitCode::FAILURE
        }
    }
}
