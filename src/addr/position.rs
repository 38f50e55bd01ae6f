//! 拓扑位置
//!
//! 交换机用 core 序号或 (pod, switch) 定位，主机用 (pod, switch, host) 定位。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// 每台下层交换机上第一个主机的序号（主机序号从 2 开始，与 IP 最后一个字节一致）
pub const FIRST_HOST: u8 = 2;

/// 一台下层交换机下挂的主机序号：`2..k/2+2`
pub fn host_indices(k: usize) -> Range<u8> {
    FIRST_HOST..FIRST_HOST + (k / 2) as u8
}

/// 交换机位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SwitchPosition {
    Core { index: u8 },
    Pod { pod: u8, switch: u8 },
}

/// 交换机所在层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Core,
    Upper,
    Lower,
}

impl SwitchPosition {
    /// 按 fat-tree 参数 k 判断所在层：pod 内 `switch < k/2` 为下层，其余为上层。
    pub fn layer(&self, k: usize) -> Layer {
        match *self {
            SwitchPosition::Core { .. } => Layer::Core,
            SwitchPosition::Pod { switch, .. } if (switch as usize) < k / 2 => Layer::Lower,
            SwitchPosition::Pod { .. } => Layer::Upper,
        }
    }

    pub fn is_core(&self) -> bool {
        matches!(self, SwitchPosition::Core { .. })
    }
}

impl fmt::Display for SwitchPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SwitchPosition::Core { index } => write!(f, "c_s{index}"),
            SwitchPosition::Pod { pod, switch } => write!(f, "p{pod}_s{switch}"),
        }
    }
}

/// 主机位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostPosition {
    pub pod: u8,
    pub switch: u8,
    pub host: u8,
}

impl HostPosition {
    pub fn new(pod: u8, switch: u8, host: u8) -> Self {
        Self { pod, switch, host }
    }

    /// 主机直连的下层交换机
    pub fn edge_switch(&self) -> SwitchPosition {
        SwitchPosition::Pod {
            pod: self.pod,
            switch: self.switch,
        }
    }
}

impl fmt::Display for HostPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}_s{}_h{}", self.pod, self.switch, self.host)
    }
}
