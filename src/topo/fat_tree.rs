//! Fat-tree 拓扑构建
//!
//! 构建顺序与仿真环境一致：逐个 pod 先建下层交换机及其主机，再建上层交换机和
//! pod 内全连接；所有 pod 建完后按序号建 core 交换机，每台 core 依 pod 顺序连到各
//! pod 的同一个上层交换机。每个节点的端口号按其链路加入顺序从 1 开始分配，
//! 路由表里的端口号都以此为准。

use std::collections::HashMap;
use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::link::{Link, LinkClass, LinkProfiles};
use crate::addr::{
    Dpid, HostPosition, Layer, MacAddr, SwitchPosition, decode_ip, encode_dpid, encode_ip,
    encode_mac, host_indices,
};

/// 支持的最大 k：core 序号 `(k/2)^2 - 1` 必须放得进 DPID 的一个字节
pub const MAX_K: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("invalid fat-tree parameter k={k}: {reason}")]
    InvalidParameter { k: i64, reason: &'static str },
}

/// 链路端点：交换机或主机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Switch(SwitchPosition),
    Host(HostPosition),
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Switch(s) => write!(f, "{s}"),
            Endpoint::Host(h) => write!(f, "{h}"),
        }
    }
}

/// 交换机
#[derive(Debug, Clone)]
pub struct Switch {
    position: SwitchPosition,
    dpid: Dpid,
    layer: Layer,
    /// `ports[i]` 为端口 `i + 1` 的对端
    ports: Vec<Endpoint>,
}

impl Switch {
    pub fn position(&self) -> SwitchPosition {
        self.position
    }

    pub fn dpid(&self) -> Dpid {
        self.dpid
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn name(&self) -> String {
        self.position.to_string()
    }

    pub fn neighbor(&self, port: u16) -> Option<Endpoint> {
        let idx = usize::from(port).checked_sub(1)?;
        self.ports.get(idx).copied()
    }

    pub fn port_to(&self, peer: Endpoint) -> Option<u16> {
        self.ports
            .iter()
            .position(|&p| p == peer)
            .map(|i| (i + 1) as u16)
    }

    /// (端口号, 对端)，按端口号升序
    pub fn ports(&self) -> impl Iterator<Item = (u16, Endpoint)> + '_ {
        self.ports
            .iter()
            .enumerate()
            .map(|(i, &ep)| ((i + 1) as u16, ep))
    }
}

/// 主机。每台主机只有一个端口（端口 1），连到所在的下层交换机。
#[derive(Debug, Clone)]
pub struct Host {
    pub position: HostPosition,
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

impl Host {
    pub fn name(&self) -> String {
        self.position.to_string()
    }

    pub fn uplink(&self) -> SwitchPosition {
        self.position.edge_switch()
    }
}

/// fat-tree 拓扑（只读）
#[derive(Debug, Clone)]
pub struct TopologyModel {
    k: usize,
    switches: Vec<Switch>,
    switch_index: HashMap<SwitchPosition, usize>,
    hosts: Vec<Host>,
    host_index: HashMap<HostPosition, usize>,
    links: Vec<Link>,
    profiles: LinkProfiles,
}

fn validate_k(k: i64) -> Result<usize, TopologyError> {
    let reason = if k < 2 {
        "k must be at least 2"
    } else if k % 2 != 0 {
        "k must be even"
    } else if k as u64 > MAX_K as u64 {
        "k too large for 8-bit core index"
    } else {
        return Ok(k as usize);
    };
    Err(TopologyError::InvalidParameter { k, reason })
}

impl TopologyModel {
    /// 使用默认链路参数构建
    pub fn build(k: i64) -> Result<Self, TopologyError> {
        Self::build_with(k, LinkProfiles::default())
    }

    #[tracing::instrument(skip(profiles))]
    pub fn build_with(k: i64, profiles: LinkProfiles) -> Result<Self, TopologyError> {
        let k = validate_k(k)?;
        let half = k / 2;

        let mut b = Builder::new(k, profiles);

        // pods[i] 为 pod i 的上层交换机，按构建顺序排列
        let pods: Vec<Vec<SwitchPosition>> = (0..k).map(|pod| b.make_pod(pod as u8)).collect();

        for core in 0..half * half {
            let c = SwitchPosition::Core { index: core as u8 };
            b.add_switch(c);

            let stride = core / half;
            for uppers in &pods {
                b.add_link(
                    Endpoint::Switch(c),
                    Endpoint::Switch(uppers[stride]),
                    LinkClass::Core,
                );
            }
        }

        let topo = b.finish();
        info!(
            k,
            switches = topo.switches.len(),
            hosts = topo.hosts.len(),
            links = topo.links.len(),
            "fat-tree 构建完成"
        );
        Ok(topo)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn half(&self) -> usize {
        self.k / 2
    }

    pub fn profiles(&self) -> &LinkProfiles {
        &self.profiles
    }

    pub fn switches(&self) -> &[Switch] {
        &self.switches
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn switch_at(&self, position: SwitchPosition) -> Option<&Switch> {
        self.switch_index
            .get(&position)
            .map(|&idx| &self.switches[idx])
    }

    pub fn host(&self, position: HostPosition) -> Option<&Host> {
        self.host_index.get(&position).map(|&idx| &self.hosts[idx])
    }

    /// 拥有该 IP 的主机；不在拓扑内返回 `None`
    pub fn host_by_ip(&self, ip: Ipv4Addr) -> Option<&Host> {
        decode_ip(ip).ok().and_then(|pos| self.host(pos))
    }

    pub fn links_of(&self, ep: Endpoint) -> impl Iterator<Item = &Link> + '_ {
        self.links.iter().filter(move |l| l.touches(ep))
    }

    /// 端点 `ep` 的端口 `port` 连到哪里
    pub fn neighbor(&self, ep: Endpoint, port: u16) -> Option<Endpoint> {
        match ep {
            Endpoint::Switch(pos) => self.switch_at(pos)?.neighbor(port),
            Endpoint::Host(pos) => {
                let host = self.host(pos)?;
                (port == 1).then(|| Endpoint::Switch(host.uplink()))
            }
        }
    }
}

struct Builder {
    k: usize,
    profiles: LinkProfiles,
    switches: Vec<Switch>,
    switch_index: HashMap<SwitchPosition, usize>,
    hosts: Vec<Host>,
    host_index: HashMap<HostPosition, usize>,
    links: Vec<Link>,
}

impl Builder {
    fn new(k: usize, profiles: LinkProfiles) -> Self {
        let half = k / 2;
        Self {
            k,
            profiles,
            switches: Vec::with_capacity(k * k + half * half),
            switch_index: HashMap::new(),
            hosts: Vec::with_capacity(k * half * half),
            host_index: HashMap::new(),
            links: Vec::new(),
        }
    }

    fn add_switch(&mut self, position: SwitchPosition) {
        self.switch_index.insert(position, self.switches.len());
        self.switches.push(Switch {
            position,
            dpid: encode_dpid(position),
            layer: position.layer(self.k),
            ports: Vec::with_capacity(self.k),
        });
    }

    fn add_host(&mut self, position: HostPosition) {
        self.host_index.insert(position, self.hosts.len());
        self.hosts.push(Host {
            position,
            ip: encode_ip(position),
            mac: encode_mac(position.pod, position.switch, position.host),
        });
    }

    /// 在 `ep` 上占用下一个端口
    fn attach(&mut self, ep: Endpoint, peer: Endpoint) -> u16 {
        match ep {
            Endpoint::Switch(pos) => {
                let sw = &mut self.switches[self.switch_index[&pos]];
                sw.ports.push(peer);
                sw.ports.len() as u16
            }
            Endpoint::Host(_) => 1,
        }
    }

    fn add_link(&mut self, a: Endpoint, b: Endpoint, class: LinkClass) {
        let a_port = self.attach(a, b);
        let b_port = self.attach(b, a);
        debug!(%a, a_port, %b, b_port, ?class, "添加链路");
        self.links.push(Link {
            a,
            a_port,
            b,
            b_port,
            class,
            profile: self.profiles.for_class(class),
        });
    }

    /// 构建一个 pod，返回其上层交换机
    fn make_pod(&mut self, pod: u8) -> Vec<SwitchPosition> {
        let half = self.k / 2;

        let lower: Vec<SwitchPosition> = (0..half)
            .map(|s| SwitchPosition::Pod {
                pod,
                switch: s as u8,
            })
            .collect();
        for &sw in &lower {
            self.add_switch(sw);
        }

        for (i, &sw) in lower.iter().enumerate() {
            for h in host_indices(self.k) {
                let host = HostPosition::new(pod, i as u8, h);
                self.add_host(host);
                self.add_link(Endpoint::Switch(sw), Endpoint::Host(host), LinkClass::Host);
            }
        }

        let upper: Vec<SwitchPosition> = (half..self.k)
            .map(|s| SwitchPosition::Pod {
                pod,
                switch: s as u8,
            })
            .collect();
        for &sw in &upper {
            self.add_switch(sw);
        }

        for &l in &lower {
            for &u in &upper {
                self.add_link(Endpoint::Switch(l), Endpoint::Switch(u), LinkClass::Pod);
            }
        }

        upper
    }

    fn finish(self) -> TopologyModel {
        TopologyModel {
            k: self.k,
            switches: self.switches,
            switch_index: self.switch_index,
            hosts: self.hosts,
            host_index: self.host_index,
            links: self.links,
            profiles: self.profiles,
        }
    }
}
