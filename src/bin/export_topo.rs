//! 导出拓扑 JSON，供仿真环境建网

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fattree_ctl::config::{ControllerConfig, LinkPreset};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "export-topo", about = "导出 fat-tree 的交换机、主机与链路描述")]
struct Args {
    #[arg(long, default_value_t = 4)]
    k: i64,
    #[arg(long, value_enum, default_value_t = LinkPreset::Default)]
    links: LinkPreset,
    /// JSON 配置文件，给出时忽略 --k / --links
    #[arg(long)]
    config: Option<PathBuf>,
    /// 输出文件，缺省写到 stdout
    #[arg(long)]
    out: Option<PathBuf>,
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

    let json = match serde_json::to_string_pretty(&topo.export()) {
        Ok(json) => json,
        Err(e) => {
            error!(error = %e, "序列化失败");
            return ExitCode::FAILURE;
        }
    };

    match &args.out {
        Some(path) => {
            if let Err(e) = fs::write(path, json) {
                error!(error = %e, path = %path.display(), "写文件失败");
                return ExitCode::FAILURE;
            }
            info!(path = %path.display(), "拓扑已导出");
        }
        None => println!("{json}"),
    }
    ExitCode::SUCCESS
}
