//! 全网路由表与逐跳追踪
//!
//! 为拓扑内每台交换机预先生成路由表，然后只依据这些表逐跳转发，
//! 用来验证任意两台主机之间可达且无环。

use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;

use tracing::{debug, trace};

use super::rule::{Rule, lookup};
use super::synth::synthesize;
use crate::addr::{HostPosition, SwitchPosition};
use crate::topo::{Endpoint, TopologyModel};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    #[error("source host {0} is not in the topology")]
    UnknownHost(HostPosition),
    #[error("no rule for {dst} on {at}")]
    NoRoute { at: SwitchPosition, dst: Ipv4Addr },
    #[error("port {port} on {at} is not connected")]
    DeadPort { at: SwitchPosition, port: u16 },
    #[error("forwarding loop at {at} while routing to {dst}")]
    Loop { at: SwitchPosition, dst: Ipv4Addr },
    #[error("packet for {dst} delivered to {to}")]
    Misdelivered { to: HostPosition, dst: Ipv4Addr },
}

/// 一跳：所在节点及出端口（最后一跳为目的主机，无出端口）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    pub node: Endpoint,
    pub out_port: Option<u16>,
}

/// 全网路由表
#[derive(Debug)]
pub struct RoutingPlan<'a> {
    topo: &'a TopologyModel,
    tables: HashMap<SwitchPosition, Vec<Rule>>,
}

impl<'a> RoutingPlan<'a> {
    pub fn build(topo: &'a TopologyModel) -> Self {
        let tables = topo
            .switches()
            .iter()
            .map(|s| (s.position(), synthesize(s.position(), topo.k())))
            .collect::<HashMap<_, _>>();
        debug!(switches = tables.len(), "全网路由表生成完成");
        Self { topo, tables }
    }

    pub fn table(&self, switch: SwitchPosition) -> Option<&[Rule]> {
        self.tables.get(&switch).map(|v| v.as_slice())
    }

    /// 从 `src` 出发，按已安装的规则把目的为 `dst` 的包逐跳送到目的主机。
    pub fn trace(&self, src: HostPosition, dst: Ipv4Addr) -> Result<Vec<Hop>, TraceError> {
        let host = self.topo.host(src).ok_or(TraceError::UnknownHost(src))?;
        if host.ip == dst {
            return Ok(vec![Hop {
                node: Endpoint::Host(src),
                out_port: None,
            }]);
        }

        let mut path = vec![Hop {
            node: Endpoint::Host(src),
            out_port: Some(1),
        }];
        let mut visited = HashSet::new();
        let mut at = host.uplink();

        loop {
            if !visited.insert(at) {
                return Err(TraceError::Loop { at, dst });
            }
            let rule = self
                .tables
                .get(&at)
                .and_then(|rules| lookup(rules, dst))
                .ok_or(TraceError::NoRoute { at, dst })?;
            trace!(switch = %at, %rule, "命中规则");
            path.push(Hop {
                node: Endpoint::Switch(at),
                out_port: Some(rule.out_port),
            });

            let next = self
                .topo
                .neighbor(Endpoint::Switch(at), rule.out_port)
                .ok_or(TraceError::DeadPort {
                    at,
                    port: rule.out_port,
                })?;
            match next {
                Endpoint::Switch(sw) => at = sw,
                Endpoint::Host(h) => {
                    let reached = self.topo.host(h).map(|h| h.ip);
                    if reached != Some(dst) {
                        return Err(TraceError::Misdelivered { to: h, dst });
                    }
                    path.push(Hop {
                        node: next,
                        out_port: None,
                    });
                    return Ok(path);
                }
            }
        }
    }
}
