//! ARP 代答
//!
//! 主机 MAC 可由 IP 推出，因此控制器直接回答 ARP 请求，不需要泛洪。

mod frame;

pub use frame::{
    ARP_HTYPE_ETHERNET, ARP_LEN, ARP_OP_REPLY, ARP_OP_REQUEST, ARP_PTYPE_IPV4, ArpPacket,
    ETH_HEADER_LEN, ETHERTYPE_ARP, EthernetFrame, arp_request,
};

use std::net::Ipv4Addr;

use tracing::debug;

use crate::addr::{MacAddr, decode_ip_to_mac};

/// ARP 抓包规则（ethertype 0x0806 -> 控制器）的优先级，高于所有 IP 路由
pub const ARP_TRAP_PRIORITY: u16 = 0x7000;

/// 不回答的原因。调用方应放行给其他处理器，而不是当作错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArpError {
    #[error("frame truncated ({len} bytes)")]
    Truncated { len: usize },
    #[error("not an ARP frame (ethertype {ethertype:#06x})")]
    NotArp { ethertype: u16 },
    #[error("unsupported ARP htype={htype} ptype={ptype:#06x}")]
    Unsupported { htype: u16, ptype: u16 },
    #[error("ARP opcode {0} is not a request")]
    NotRequest(u16),
    #[error("target {0} is outside the host address plan")]
    ForeignTarget(Ipv4Addr),
}

/// 为请求 `target_ip` 的主机构造 ARP 应答帧。
///
/// 应答的源 MAC 只由 `target_ip` 决定，与请求方无关。
pub fn build_reply(
    target_ip: Ipv4Addr,
    sender_mac: MacAddr,
    sender_ip: Ipv4Addr,
) -> Result<EthernetFrame, ArpError> {
    let hwsrc = decode_ip_to_mac(target_ip).map_err(|_| ArpError::ForeignTarget(target_ip))?;
    Ok(EthernetFrame {
        dst: sender_mac,
        src: hwsrc,
        ethertype: ETHERTYPE_ARP,
        arp: ArpPacket {
            htype: ARP_HTYPE_ETHERNET,
            ptype: ARP_PTYPE_IPV4,
            hlen: 6,
            plen: 4,
            opcode: ARP_OP_REPLY,
            sender_mac: hwsrc,
            sender_ip: target_ip,
            target_mac: sender_mac,
            target_ip: sender_ip,
        },
    })
}

/// 解析原始帧，若是 ARP 请求则返回应答帧。
pub fn respond(data: &[u8]) -> Result<EthernetFrame, ArpError> {
    let frame = EthernetFrame::parse(data)?;
    let req = &frame.arp;
    if req.opcode != ARP_OP_REQUEST {
        return Err(ArpError::NotRequest(req.opcode));
    }
    debug!(
        sender_ip = %req.sender_ip,
        sender_mac = %req.sender_mac,
        target_ip = %req.target_ip,
        "ARP request"
    );
    build_reply(req.target_ip, req.sender_mac, req.sender_ip)
}
