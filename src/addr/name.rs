//! 节点名称
//!
//! 交换机名 `c_s{index}` / `p{pod}_s{switch}`，主机名 `p{pod}_s{switch}_h{host}`。
//! 解析要求整串匹配，`p1_s2_h3` 不是合法的交换机名。

use std::net::Ipv4Addr;

use super::AddrError;
use super::ip::encode_ip;
use super::position::{HostPosition, SwitchPosition};

pub fn switch_name(position: SwitchPosition) -> String {
    position.to_string()
}

pub fn host_name(pod: u8, switch: u8, host: u8) -> String {
    HostPosition::new(pod, switch, host).to_string()
}

fn parse_index(digits: &str, name: &str) -> Result<u8, AddrError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddrError::InvalidName(name.to_string()));
    }
    digits
        .parse()
        .map_err(|_| AddrError::InvalidName(name.to_string()))
}

/// `p{pod}_s{switch}` -> (pod, switch)
pub fn parse_switch_name(name: &str) -> Result<(u8, u8), AddrError> {
    let invalid = || AddrError::InvalidName(name.to_string());
    let rest = name.strip_prefix('p').ok_or_else(invalid)?;
    let (pod, switch) = rest.split_once("_s").ok_or_else(invalid)?;
    Ok((parse_index(pod, name)?, parse_index(switch, name)?))
}

/// `c_s{index}` -> index
pub fn parse_core_name(name: &str) -> Result<u8, AddrError> {
    let digits = name
        .strip_prefix("c_s")
        .ok_or_else(|| AddrError::InvalidName(name.to_string()))?;
    parse_index(digits, name)
}

/// `p{pod}_s{switch}_h{host}` -> 主机位置
pub fn parse_host_name(name: &str) -> Result<HostPosition, AddrError> {
    let invalid = || AddrError::InvalidName(name.to_string());
    let rest = name.strip_prefix('p').ok_or_else(invalid)?;
    let (pod, rest) = rest.split_once("_s").ok_or_else(invalid)?;
    let (switch, host) = rest.split_once("_h").ok_or_else(invalid)?;
    Ok(HostPosition::new(
        parse_index(pod, name)?,
        parse_index(switch, name)?,
        parse_index(host, name)?,
    ))
}

pub fn host_name_to_ip(name: &str) -> Result<Ipv4Addr, AddrError> {
    parse_host_name(name).map(encode_ip)
}
