//! 地址编码
//!
//! 拓扑位置与 DPID / IPv4 / MAC / 名称之间的纯函数映射，无状态。
//! 整个寻址方案的前提：主机 MAC 可以直接由其 IP 推出，不需要查表。

// 子模块声明
mod dpid;
mod ip;
mod mac;
mod name;
mod position;

// 重新导出公共接口
pub use dpid::{CORE_MARKER, Dpid, POD_MARKER, decode_position, dpid_to_name, encode_dpid, is_core};
pub use ip::{HOST_NET_OCTET, decode_ip, decode_ip_str_to_mac, decode_ip_to_mac, encode_ip};
pub use mac::{MAC_PREFIX, MacAddr, encode_mac};
pub use name::{
    host_name, host_name_to_ip, parse_core_name, parse_host_name, parse_switch_name, switch_name,
};
pub use position::{FIRST_HOST, HostPosition, Layer, SwitchPosition, host_indices};

/// 地址编解码错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddrError {
    #[error("invalid {what} encoding: {value}")]
    InvalidEncoding { what: &'static str, value: String },
    #[error("invalid node name: {0:?}")]
    InvalidName(String),
}
