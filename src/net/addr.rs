//! 地址派生
//!
//! 由主机下标确定性地派生 MAC 与 IPv4 地址。同一下标永远得到同一地址，
//! 不同下标得到不同地址，不依赖任何共享状态。

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `10.0.0.0/8` 内可用的最大主机下标（排除网络地址与广播地址）
pub const MAX_ADDR_INDEX: usize = 0x00ff_fffe;

const IP_BASE: u32 = u32::from_be_bytes([10, 0, 0, 0]);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddrError {
    #[error("address index {index} out of range 1..={max}")]
    IndexOutOfRange { index: usize, max: usize },

    #[error("malformed MAC address {0:?}")]
    MalformedMac(String),
}

fn check_index(index: usize) -> Result<(), AddrError> {
    if index == 0 || index > MAX_ADDR_INDEX {
        return Err(AddrError::IndexOutOfRange {
            index,
            max: MAX_ADDR_INDEX,
        });
    }
    Ok(())
}

/// 48 位 MAC 地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddr(pub [u8; 6]);

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for MacAddr {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AddrError::MalformedMac(s.to_string());
        let mut bytes = [0u8; 6];
        let mut parts = s.split(':');
        for byte in bytes.iter_mut() {
            let part = parts.next().ok_or_else(malformed)?;
            if part.len() != 2 {
                return Err(malformed());
            }
            *byte = u8::from_str_radix(part, 16).map_err(|_| malformed())?;
        }
        if parts.next().is_some() {
            return Err(malformed());
        }
        Ok(MacAddr(bytes))
    }
}

impl TryFrom<String> for MacAddr {
    type Error = AddrError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<MacAddr> for String {
    fn from(mac: MacAddr) -> Self {
        mac.to_string()
    }
}

/// 下标的大端 48 位编码，例如 1 -> `00:00:00:00:00:01`
pub fn mac_for(index: usize) -> Result<MacAddr, AddrError> {
    check_index(index)?;
    let raw = (index as u64).to_be_bytes();
    let mut bytes = [0u8; 6];
    bytes.copy_from_slice(&raw[2..]);
    Ok(MacAddr(bytes))
}

/// `10.0.0.0 + index`，例如 1 -> `10.0.0.1`，256 -> `10.0.1.0`
pub fn ip_for(index: usize) -> Result<Ipv4Addr, AddrError> {
    check_index(index)?;
    Ok(Ipv4Addr::from(IP_BASE + index as u32))
}
