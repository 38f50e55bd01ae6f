//! 控制器服务
//!
//! 持有拓扑，处理连接建立（下发路由表）和 packet-in（ARP 代答）。
//! 事件由外部逐个投递，这里不需要任何同步。

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::event::{ConnId, ConnState, ControllerEvent, Disposition};
use super::sink::{PacketSink, RuleSink};
use crate::addr::{Dpid, SwitchPosition, decode_position};
use crate::arp::{self, ARP_TRAP_PRIORITY};
use crate::routing::synthesize;
use crate::topo::TopologyModel;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    /// DPID 既不是 core 也不是本拓扑内的 pod 交换机；不下发任何规则
    #[error("unknown switch class for dpid {dpid}")]
    UnknownSwitchClass { dpid: Dpid },
}

#[derive(Debug, Clone, Copy)]
struct Connection {
    dpid: Dpid,
    state: ConnState,
}

pub struct ControllerService<S> {
    topo: TopologyModel,
    sink: S,
    conns: HashMap<ConnId, Connection>,
}

impl<S: RuleSink + PacketSink> ControllerService<S> {
    pub fn new(topo: TopologyModel, sink: S) -> Self {
        Self {
            topo,
            sink,
            conns: HashMap::new(),
        }
    }

    pub fn topology(&self) -> &TopologyModel {
        &self.topo
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn connection_state(&self, conn: ConnId) -> Option<ConnState> {
        self.conns.get(&conn).map(|c| c.state)
    }

    /// 事件入口
    #[tracing::instrument(skip(self, event), fields(kind = event.kind()))]
    pub fn handle(&mut self, event: ControllerEvent) -> Result<Disposition, ControllerError> {
        match event {
            ControllerEvent::ConnectionUp { dpid, conn } => self.on_connection_up(dpid, conn),
            ControllerEvent::PacketIn {
                conn,
                in_port,
                data,
            } => Ok(self.on_packet_in(conn, in_port, &data)),
        }
    }

    /// DPID -> 本拓扑内的交换机位置
    pub fn classify(&self, dpid: Dpid) -> Result<SwitchPosition, ControllerError> {
        decode_position(dpid)
            .ok()
            .filter(|&pos| self.topo.switch_at(pos).is_some())
            .ok_or(ControllerError::UnknownSwitchClass { dpid })
    }

    fn on_connection_up(&mut self, dpid: Dpid, conn: ConnId) -> Result<Disposition, ControllerError> {
        self.conns.insert(
            conn,
            Connection {
                dpid,
                state: ConnState::Connected,
            },
        );

        let position = self.classify(dpid).inspect_err(|e| {
            warn!(%dpid, ?conn, error = %e, "拒绝为未知交换机下发规则");
        })?;
        let layer = position.layer(self.topo.k());

        self.sink.install_arp_trap(conn, ARP_TRAP_PRIORITY);

        let rules = synthesize(position, self.topo.k());
        for rule in &rules {
            debug!(switch = %position, %rule, "下发规则");
            self.sink.install_rule(conn, rule);
        }

        if let Some(c) = self.conns.get_mut(&conn) {
            c.state = ConnState::RulesInstalled;
        }
        info!(switch = %position, ?layer, %dpid, rules = rules.len(), "路由表已下发");
        Ok(Disposition::RulesInstalled { count: rules.len() })
    }

    fn on_packet_in(&mut self, conn: ConnId, in_port: u16, data: &[u8]) -> Disposition {
        let reply = match arp::respond(data) {
            Ok(reply) => reply,
            Err(reason) => {
                debug!(?conn, in_port, %reason, "不代答，交给后续处理器");
                return Disposition::Continue;
            }
        };

        let switch = self
            .conns
            .get(&conn)
            .and_then(|c| decode_position(c.dpid).ok());
        debug!(
            ?switch,
            in_port,
            target = %reply.arp.sender_ip,
            mac = %reply.src,
            "ARP reply"
        );
        self.sink.send_packet_out(conn, in_port, reply.to_bytes());
        Disposition::Halt
    }
}
