//! Fat-tree 控制器回放
//!
//! 构建拓扑，按构建顺序为每台交换机投递一次 ConnectionUp，打印各交换机收到的路由表。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fattree_ctl::config::{ControllerConfig, LinkPreset};
use fattree_ctl::controller::{
    ConnId, ControllerEvent, ControllerService, Disposition, RecordingSink,
};
use fattree_ctl::routing::Rule;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "fattree-ctl", about = "Fat-tree 两级路由控制器：回放全部交换机的连接并输出路由表")]
struct Args {
    /// fat-tree 参数 k（偶数，>= 2）
    #[arg(long, default_value_t = 4, allow_negative_numbers = true)]
    k: i64,
    /// JSON 配置文件，给出时忽略 --k / --links
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = LinkPreset::Default)]
    links: LinkPreset,
    /// 以 JSON 输出
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct SwitchTable {
    name: String,
    dpid: String,
    rules: Vec<Rule>,
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

    let cfg = match &args.config {
        Some(path) => match ControllerConfig::from_json_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = %e, "加载配置失败");
                return ExitCode::FAILURE;
            }
        },
        None => ControllerConfig {
            k: args.k,
            link_preset: args.links,
            links: None,
        },
    };

    let topo = match cfg.build_topology() {
        Ok(topo) => topo,
        Err(e) => {
            error!(error = %e, "构建拓扑失败");
            return ExitCode::FAILURE;
        }
    };

    let switches: Vec<_> = topo
        .switches()
        .iter()
        .map(|s| (s.name(), s.dpid()))
        .collect();
    let mut ctl = ControllerService::new(topo, RecordingSink::default());

    let mut tables = Vec::with_capacity(switches.len());
    for (i, (name, dpid)) in switches.into_iter().enumerate() {
        let conn = ConnId(i as u64 + 1);
        match ctl.handle(ControllerEvent::ConnectionUp { dpid, conn }) {
            Ok(Disposition::RulesInstalled { .. }) => {}
            Ok(other) => {
                error!(?other, %name, "ConnectionUp 未下发规则");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                error!(error = %e, %name, "ConnectionUp 处理失败");
                return ExitCode::FAILURE;
            }
        }
        tables.push(SwitchTable {
            name,
            dpid: dpid.to_string(),
            rules: ctl.sink().rules_for(conn),
        });
    }

    if args.json {
        match serde_json::to_string_pretty(&tables) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                error!(error = %e, "序列化失败");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for t in &tables {
            println!("{} ({})", t.name, t.dpid);
            for r in &t.rules {
                println!("  {r}");
            }
        }
    }
    ExitCode::SUCCESS
}
