//! 两级路由表生成
//!
//! - core：每个 pod 一条 `10.pod.0.0/16`，端口 `pod + 1`。
//! - 上层：每个下层交换机一条 `10.pod.subnet.0/24`，端口 `subnet + 1`。
//! - 下层：每台主机一条 `10.pod.switch.host/32`，端口 `host - 1`。
//! - 上层和下层另有按目的 IP 最后一字节散列的上行路由（优先级较低），端口为
//!   `(host - 2 + switch) % (k/2) + k/2 + 1`，即 k/2 个上行口之一，并按本交换机序号错开。

use std::net::Ipv4Addr;

use tracing::trace;

use super::rule::{HASHED_PRIORITY, ROUTE_PRIORITY, Rule, RuleKind};
use crate::addr::{FIRST_HOST, HOST_NET_OCTET, Layer, SwitchPosition, host_indices};

const MASK_16: Ipv4Addr = Ipv4Addr::new(255, 255, 0, 0);
const MASK_24: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 0);
const MASK_32: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 255);
const MASK_LAST_OCTET: Ipv4Addr = Ipv4Addr::new(0, 0, 0, 255);

/// 生成 `position` 处交换机应安装的全部规则。
///
/// 调用方需保证 `position` 属于参数为 `k` 的 fat-tree（见 `TopologyModel::switch_at`）。
/// 相同输入总是得到完全相同的规则序列。
pub fn synthesize(position: SwitchPosition, k: usize) -> Vec<Rule> {
    let rules = match (position, position.layer(k)) {
        (SwitchPosition::Core { .. }, _) => core_rules(k),
        (SwitchPosition::Pod { pod, switch }, Layer::Upper) => {
            let mut rules = pod_down_rules(pod, k);
            rules.extend(uplink_rules(switch, k));
            rules
        }
        (SwitchPosition::Pod { pod, switch }, _) => {
            let mut rules = host_rules(pod, switch, k);
            rules.extend(uplink_rules(switch, k));
            rules
        }
    };
    trace!(%position, k, rules = rules.len(), "生成路由表");
    rules
}

fn core_rules(k: usize) -> Vec<Rule> {
    (0..k)
        .map(|pod| {
            Rule::new(
                Ipv4Addr::new(HOST_NET_OCTET, pod as u8, 0, 0),
                MASK_16,
                (pod + 1) as u16,
                ROUTE_PRIORITY,
                RuleKind::CoreDown,
            )
        })
        .collect()
}

fn pod_down_rules(pod: u8, k: usize) -> Vec<Rule> {
    (0..k / 2)
        .map(|subnet| {
            Rule::new(
                Ipv4Addr::new(HOST_NET_OCTET, pod, subnet as u8, 0),
                MASK_24,
                (subnet + 1) as u16,
                ROUTE_PRIORITY,
                RuleKind::PodDown,
            )
        })
        .collect()
}

fn host_rules(pod: u8, switch: u8, k: usize) -> Vec<Rule> {
    host_indices(k)
        .map(|host| {
            Rule::new(
                Ipv4Addr::new(HOST_NET_OCTET, pod, switch, host),
                MASK_32,
                (host - 1) as u16,
                ROUTE_PRIORITY,
                RuleKind::HostExact,
            )
        })
        .collect()
}

fn uplink_rules(switch: u8, k: usize) -> Vec<Rule> {
    host_indices(k)
        .map(|host| {
            Rule::new(
                Ipv4Addr::new(0, 0, 0, host),
                MASK_LAST_OCTET,
                uplink_port(host, switch, k),
                HASHED_PRIORITY,
                RuleKind::UplinkHashed,
            )
        })
        .collect()
}

/// 目的主机序号为 `host` 的流量在 `switch` 上走哪个上行口。
pub fn uplink_port(host: u8, switch: u8, k: usize) -> u16 {
    let half = k / 2;
    let offset = usize::from(host - FIRST_HOST);
    ((offset + usize::from(switch)) % half + half + 1) as u16
}
