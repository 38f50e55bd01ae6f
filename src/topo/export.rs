//! 拓扑导出
//!
//! 给仿真/物理网络构建环境使用的 JSON 描述：交换机、主机、链路及其属性。

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::fat_tree::TopologyModel;
use super::link::{LinkClass, LinkProfile};
use crate::addr::{Layer, MacAddr};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologySpec {
    pub k: usize,
    pub switches: Vec<SwitchSpec>,
    pub hosts: Vec<HostSpec>,
    pub links: Vec<LinkSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchSpec {
    pub name: String,
    /// 16 位十六进制字符串
    pub dpid: String,
    pub layer: Layer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostSpec {
    pub name: String,
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
    pub switch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSpec {
    pub a: String,
    pub a_port: u16,
    pub b: String,
    pub b_port: u16,
    pub class: LinkClass,
    #[serde(flatten)]
    pub profile: LinkProfile,
}

impl TopologyModel {
    pub fn export(&self) -> TopologySpec {
        TopologySpec {
            k: self.k(),
            switches: self
                .switches()
                .iter()
                .map(|s| SwitchSpec {
                    name: s.name(),
                    dpid: s.dpid().to_string(),
                    layer: s.layer(),
                })
                .collect(),
            hosts: self
                .hosts()
                .iter()
                .map(|h| HostSpec {
                    name: h.name(),
                    ip: h.ip,
                    mac: h.mac,
                    switch: h.uplink().to_string(),
                })
                .collect(),
            links: self
                .links()
                .iter()
                .map(|l| LinkSpec {
                    a: l.a.to_string(),
                    a_port: l.a_port,
                    b: l.b.to_string(),
                    b_port: l.b_port,
                    class: l.class,
                    profile: l.profile,
                })
                .collect(),
        }
    }
}
