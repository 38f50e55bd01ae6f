//! Datapath 标识符
//!
//! DPID 是 48 位整数，按固定字节布局编码交换机位置（bit 0 为最低位）：
//!
//! | 类型 | bits 24..32 | bits 16..24 | bits 8..16 | bits 0..8 |
//! |------|-------------|-------------|------------|-----------|
//! | core | `0x10`      | core index  | 0          | 0         |
//! | pod  | `0x20`      | 0           | pod        | switch    |
//!
//! bits 32..48 恒为 0。写成 16 位十六进制即 `0000000010CC0000` / `000000002000PPSS`。

use std::fmt;
use std::str::FromStr;

use super::AddrError;
use super::position::SwitchPosition;

/// core 交换机标记字节
pub const CORE_MARKER: u8 = 0x10;
/// pod 交换机标记字节
pub const POD_MARKER: u8 = 0x20;

const MARKER_SHIFT: u32 = 24;
const CORE_INDEX_SHIFT: u32 = 16;
const POD_SHIFT: u32 = 8;
const DPID_BITS_MASK: u64 = 0xffff_ffff_ffff;

/// Datapath 标识符（48 位）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dpid(pub u64);

impl Dpid {
    /// bits 24..32 的标记字节
    pub fn marker(self) -> u8 {
        ((self.0 >> MARKER_SHIFT) & 0xff) as u8
    }
}

impl fmt::Display for Dpid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for Dpid {
    type Err = AddrError;

    /// 解析十六进制 DPID，可带 `0x` 前缀。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let invalid = || AddrError::InvalidEncoding {
            what: "dpid",
            value: s.to_string(),
        };
        let raw = u64::from_str_radix(digits, 16).map_err(|_| invalid())?;
        if raw & !DPID_BITS_MASK != 0 {
            return Err(invalid());
        }
        Ok(Dpid(raw))
    }
}

/// 位置 -> DPID
pub fn encode_dpid(position: SwitchPosition) -> Dpid {
    match position {
        SwitchPosition::Core { index } => Dpid(
            (CORE_MARKER as u64) << MARKER_SHIFT | (index as u64) << CORE_INDEX_SHIFT,
        ),
        SwitchPosition::Pod { pod, switch } => {
            Dpid((POD_MARKER as u64) << MARKER_SHIFT | (pod as u64) << POD_SHIFT | switch as u64)
        }
    }
}

/// bits 24..32 为 `0x10` 即为 core 交换机。
pub fn is_core(dpid: Dpid) -> bool {
    dpid.marker() == CORE_MARKER
}

/// DPID -> 位置，`encode_dpid` 的逆映射。
///
/// 不符合上表布局的值（未知标记、保留位非零）一律返回 `InvalidEncoding`。
pub fn decode_position(dpid: Dpid) -> Result<SwitchPosition, AddrError> {
    let invalid = || AddrError::InvalidEncoding {
        what: "dpid",
        value: dpid.to_string(),
    };
    if dpid.0 >> 32 != 0 {
        return Err(invalid());
    }
    let [marker, b2, b1, b0] = (dpid.0 as u32).to_be_bytes();
    match marker {
        CORE_MARKER if b1 == 0 && b0 == 0 => Ok(SwitchPosition::Core { index: b2 }),
        POD_MARKER if b2 == 0 => Ok(SwitchPosition::Pod {
            pod: b1,
            switch: b0,
        }),
        _ => Err(invalid()),
    }
}

/// DPID -> 交换机名称（`c_s3` / `p1_s2`）
pub fn dpid_to_name(dpid: Dpid) -> Result<String, AddrError> {
    decode_position(dpid).map(|p| p.to_string())
}
