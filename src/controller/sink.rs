//! 下发接口
//!
//! 规则和 packet-out 都是发出即忘，不跟踪确认。

use serde::Serialize;

use super::event::ConnId;
use crate::routing::Rule;

pub trait RuleSink {
    /// 下发一条 IPv4 目的地址匹配规则
    fn install_rule(&mut self, conn: ConnId, rule: &Rule);

    /// 下发 "ARP -> 控制器" 规则
    fn install_arp_trap(&mut self, conn: ConnId, priority: u16);
}

pub trait PacketSink {
    /// 从 `in_port` 原路发回一帧
    fn send_packet_out(&mut self, conn: ConnId, in_port: u16, frame: Vec<u8>);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum SinkCommand {
    InstallRule { conn: ConnId, rule: Rule },
    InstallArpTrap { conn: ConnId, priority: u16 },
    PacketOut { conn: ConnId, in_port: u16, frame: Vec<u8> },
}

/// 把所有下发按顺序记下来，用于回放和测试
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub commands: Vec<SinkCommand>,
}

impl RecordingSink {
    /// 某条连接收到的路由规则，按下发顺序
    pub fn rules_for(&self, conn: ConnId) -> Vec<Rule> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                SinkCommand::InstallRule { conn: c, rule } if *c == conn => Some(*rule),
                _ => None,
            })
            .collect()
    }
}

impl RuleSink for RecordingSink {
    fn install_rule(&mut self, conn: ConnId, rule: &Rule) {
        self.commands.push(SinkCommand::InstallRule { conn, rule: *rule });
    }

    fn install_arp_trap(&mut self, conn: ConnId, priority: u16) {
        self.commands
            .push(SinkCommand::InstallArpTrap { conn, priority });
    }
}

impl PacketSink for RecordingSink {
    fn send_packet_out(&mut self, conn: ConnId, in_port: u16, frame: Vec<u8>) {
        self.commands.push(SinkCommand::PacketOut {
            conn,
            in_port,
            frame,
        });
    }
}
