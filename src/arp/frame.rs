//! 以太网 + ARP 帧
//!
//! 只处理 Ethernet II 承载的 Ethernet/IPv4 ARP（RFC 826），其余一律视为无法解析。

use std::net::Ipv4Addr;

use super::ArpError;
use crate::addr::MacAddr;

pub const ETH_HEADER_LEN: usize = 14;
pub const ARP_LEN: usize = 28;
pub const ETHERTYPE_ARP: u16 = 0x0806;
pub const ARP_HTYPE_ETHERNET: u16 = 1;
pub const ARP_PTYPE_IPV4: u16 = 0x0800;
pub const ARP_OP_REQUEST: u16 = 1;
pub const ARP_OP_REPLY: u16 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpPacket {
    pub htype: u16,
    pub ptype: u16,
    pub hlen: u8,
    pub plen: u8,
    pub opcode: u16,
    pub sender_mac: MacAddr,
    pub sender_ip: Ipv4Addr,
    pub target_mac: MacAddr,
    pub target_ip: Ipv4Addr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetFrame {
    pub dst: MacAddr,
    pub src: MacAddr,
    pub ethertype: u16,
    pub arp: ArpPacket,
}

fn mac_at(data: &[u8], at: usize) -> MacAddr {
    let mut b = [0u8; 6];
    b.copy_from_slice(&data[at..at + 6]);
    MacAddr(b)
}

fn ip_at(data: &[u8], at: usize) -> Ipv4Addr {
    Ipv4Addr::new(data[at], data[at + 1], data[at + 2], data[at + 3])
}

fn u16_at(data: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([data[at], data[at + 1]])
}

impl EthernetFrame {
    pub fn parse(data: &[u8]) -> Result<Self, ArpError> {
        if data.len() < ETH_HEADER_LEN {
            return Err(ArpError::Truncated { len: data.len() });
        }
        let ethertype = u16_at(data, 12);
        if ethertype != ETHERTYPE_ARP {
            return Err(ArpError::NotArp { ethertype });
        }
        if data.len() < ETH_HEADER_LEN + ARP_LEN {
            return Err(ArpError::Truncated { len: data.len() });
        }

        let a = &data[ETH_HEADER_LEN..];
        let (htype, ptype, hlen, plen) = (u16_at(a, 0), u16_at(a, 2), a[4], a[5]);
        if htype != ARP_HTYPE_ETHERNET || ptype != ARP_PTYPE_IPV4 || hlen != 6 || plen != 4 {
            return Err(ArpError::Unsupported { htype, ptype });
        }

        Ok(Self {
            dst: mac_at(data, 0),
            src: mac_at(data, 6),
            ethertype,
            arp: ArpPacket {
                htype,
                ptype,
                hlen,
                plen,
                opcode: u16_at(a, 6),
                sender_mac: mac_at(a, 8),
                sender_ip: ip_at(a, 14),
                target_mac: mac_at(a, 18),
                target_ip: ip_at(a, 24),
            },
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let arp = &self.arp;
        let mut out = Vec::with_capacity(ETH_HEADER_LEN + ARP_LEN);
        out.extend_from_slice(&self.dst.0);
        out.extend_from_slice(&self.src.0);
        out.extend_from_slice(&self.ethertype.to_be_bytes());
        out.extend_from_slice(&arp.htype.to_be_bytes());
        out.extend_from_slice(&arp.ptype.to_be_bytes());
        out.push(arp.hlen);
        out.push(arp.plen);
        out.extend_from_slice(&arp.opcode.to_be_bytes());
        out.extend_from_slice(&arp.sender_mac.0);
        out.extend_from_slice(&arp.sender_ip.octets());
        out.extend_from_slice(&arp.target_mac.0);
        out.extend_from_slice(&arp.target_ip.octets());
        out
    }
}

/// 构造一个广播 ARP 请求，主要给测试和回放用
pub fn arp_request(sender_mac: MacAddr, sender_ip: Ipv4Addr, target_ip: Ipv4Addr) -> EthernetFrame {
    EthernetFrame {
        dst: MacAddr::BROADCAST,
        src: sender_mac,
        ethertype: ETHERTYPE_ARP,
        arp: ArpPacket {
            htype: ARP_HTYPE_ETHERNET,
            ptype: ARP_PTYPE_IPV4,
            hlen: 6,
            plen: 4,
            opcode: ARP_OP_REQUEST,
            sender_mac,
            sender_ip,
            target_mac: MacAddr::ZERO,
            target_ip,
        },
    }
}
