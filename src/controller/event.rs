//! 控制器事件
//!
//! 控制面协议栈逐个投递这些事件，`ControllerService::handle` 统一分发。

use serde::{Deserialize, Serialize};

use crate::addr::Dpid;

/// 控制面连接句柄，每台交换机一条连接
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// 交换机连上控制器
    ConnectionUp { dpid: Dpid, conn: ConnId },
    /// 交换机把一个包送上来
    PacketIn {
        conn: ConnId,
        in_port: u16,
        data: Vec<u8>,
    },
}

impl ControllerEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ControllerEvent::ConnectionUp { .. } => "connection_up",
            ControllerEvent::PacketIn { .. } => "packet_in",
        }
    }
}

/// 事件处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// 已为该连接下发 `count` 条路由规则
    RulesInstalled { count: usize },
    /// 已处理该包，后续处理器不应再处理
    Halt,
    /// 未处理，交给后续处理器
    Continue,
}

/// 连接的建立阶段状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    Connected,
    RulesInstalled,
}
