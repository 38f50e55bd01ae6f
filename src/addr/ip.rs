//! 主机 IPv4 地址
//!
//! 主机 (pod, switch, host) 的地址为 `10.pod.switch.host`。

use std::net::Ipv4Addr;

use super::AddrError;
use super::mac::{MacAddr, encode_mac};
use super::position::HostPosition;

/// 主机地址段的首字节
pub const HOST_NET_OCTET: u8 = 10;

pub fn encode_ip(host: HostPosition) -> Ipv4Addr {
    Ipv4Addr::new(HOST_NET_OCTET, host.pod, host.switch, host.host)
}

/// IPv4 -> 主机位置。只检查 `10.0.0.0/8`，不检查是否落在某个具体拓扑内。
pub fn decode_ip(ip: Ipv4Addr) -> Result<HostPosition, AddrError> {
    let [net, pod, switch, host] = ip.octets();
    if net != HOST_NET_OCTET {
        return Err(AddrError::InvalidEncoding {
            what: "host ip",
            value: ip.to_string(),
        });
    }
    Ok(HostPosition::new(pod, switch, host))
}

/// 由 IP 直接推出拥有该 IP 的主机的 MAC。
pub fn decode_ip_to_mac(ip: Ipv4Addr) -> Result<MacAddr, AddrError> {
    let h = decode_ip(ip)?;
    Ok(encode_mac(h.pod, h.switch, h.host))
}

/// 点分十进制字符串版本的 [`decode_ip_to_mac`]。
pub fn decode_ip_str_to_mac(ip: &str) -> Result<MacAddr, AddrError> {
    let parsed: Ipv4Addr = ip.parse().map_err(|_| AddrError::InvalidEncoding {
        what: "host ip",
        value: ip.to_string(),
    })?;
    decode_ip_to_mac(parsed)
}
