//! 转发规则
//!
//! 一条规则 = (目的前缀, 掩码, 出端口, 优先级)。交换机对目的 IP 取优先级最高的匹配。

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

/// 精确路由（向下 / 到主机）的优先级
pub const ROUTE_PRIORITY: u16 = 100;
/// 按目的主机序号散列的上行默认路由的优先级
pub const HASHED_PRIORITY: u16 = 50;

/// 规则类别，只用于日志和检查，不下发给交换机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// core -> pod：`10.pod.0.0/16`
    CoreDown,
    /// 上层 -> 下层交换机：`10.pod.subnet.0/24`
    PodDown,
    /// 下层 -> 主机：`10.pod.switch.host/32`
    HostExact,
    /// 上行：`0.0.0.host/0.0.0.255`
    UplinkHashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub dst: Ipv4Addr,
    pub mask: Ipv4Addr,
    pub out_port: u16,
    pub priority: u16,
    pub kind: RuleKind,
}

impl Rule {
    pub fn new(dst: Ipv4Addr, mask: Ipv4Addr, out_port: u16, priority: u16, kind: RuleKind) -> Self {
        Self {
            dst,
            mask,
            out_port,
            priority,
            kind,
        }
    }

    pub fn matches(&self, ip: Ipv4Addr) -> bool {
        let mask = u32::from(self.mask);
        u32::from(ip) & mask == u32::from(self.dst) & mask
    }

    /// 两条规则的匹配空间是否相交
    pub fn overlaps(&self, other: &Rule) -> bool {
        let common = u32::from(self.mask) & u32::from(other.mask);
        u32::from(self.dst) & common == u32::from(other.dst) & common
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} -> port {} (prio {})",
            self.dst, self.mask, self.out_port, self.priority
        )
    }
}

/// 取 `ip` 的最高优先级匹配；同优先级时先出现者胜出。
pub fn lookup(rules: &[Rule], ip: Ipv4Addr) -> Option<&Rule> {
    rules
        .iter()
        .filter(|r| r.matches(ip))
        .fold(None, |best: Option<&Rule>, r| match best {
            Some(b) if b.priority >= r.priority => Some(b),
            _ => Some(r),
        })
}
