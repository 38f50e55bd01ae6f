//! 链路类型
//!
//! 链路带宽与队列长度只影响仿真环境，与路由无关；按链路类别配置。

use serde::{Deserialize, Serialize};

use super::fat_tree::Endpoint;

/// 链路类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkClass {
    /// 下层交换机 <-> 主机
    Host,
    /// pod 内下层 <-> 上层
    Pod,
    /// 上层 <-> core
    Core,
}

/// 单条链路的带宽（Mbps）与最大队列长度（包）。`None` 表示使用仿真环境的默认值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkProfile {
    #[serde(default)]
    pub bandwidth_mbps: Option<u32>,
    #[serde(default)]
    pub max_queue_size: Option<u32>,
}

impl LinkProfile {
    pub const fn new(bandwidth_mbps: Option<u32>, max_queue_size: Option<u32>) -> Self {
        Self {
            bandwidth_mbps,
            max_queue_size,
        }
    }
}

/// 各类链路的配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkProfiles {
    pub host: LinkProfile,
    pub pod: LinkProfile,
    pub core: LinkProfile,
}

impl Default for LinkProfiles {
    fn default() -> Self {
        Self {
            host: LinkProfile::new(Some(15), Some(500)),
            pod: LinkProfile::new(Some(20), Some(700)),
            core: LinkProfile::new(Some(25), Some(700)),
        }
    }
}

impl LinkProfiles {
    /// 旧版拓扑脚本使用的参数：pod 内链路不限速，core 链路 10Mbps / 500 包。
    pub fn legacy() -> Self {
        Self {
            host: LinkProfile::new(Some(10), None),
            pod: LinkProfile::new(None, None),
            core: LinkProfile::new(Some(10), Some(500)),
        }
    }

    pub fn for_class(&self, class: LinkClass) -> LinkProfile {
        match class {
            LinkClass::Host => self.host,
            LinkClass::Pod => self.pod,
            LinkClass::Core => self.core,
        }
    }
}

/// 无向链路，两端各占用一个端口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub a: Endpoint,
    pub a_port: u16,
    pub b: Endpoint,
    pub b_port: u16,
    pub class: LinkClass,
    pub profile: LinkProfile,
}

impl Link {
    pub fn touches(&self, ep: Endpoint) -> bool {
        self.a == ep || self.b == ep
    }

    /// 从 `ep` 一侧看过去的对端及 `ep` 自己的端口号
    pub fn peer_of(&self, ep: Endpoint) -> Option<(u16, Endpoint)> {
        if self.a == ep {
            Some((self.a_port, self.b))
        } else if self.b == ep {
            Some((self.b_port, self.a))
        } else {
            None
        }
    }
}
