//! 链路带宽
//!
//! 解析形如 `1Gbps`、`2.5Mbps` 的带宽字符串。原文保留下来作为边的
//! `capacity` 属性输出，同时换算出 bps 供下游使用。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BandwidthError {
    #[error("empty bandwidth string")]
    Empty,

    #[error("bandwidth {0:?} is missing a unit (bps, Kbps, Mbps, Gbps, Tbps)")]
    MissingUnit(String),

    #[error("bandwidth {0:?} has an unknown unit")]
    UnknownUnit(String),

    #[error("bandwidth {0:?} is not a positive number")]
    InvalidValue(String),

    #[error("bandwidth {0:?} does not fit in 64 bits per second")]
    Overflow(String),
}

/// 带宽：原始文本 + 换算后的 bits/s
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bandwidth {
    text: String,
    bps: u64,
}

impl Bandwidth {
    pub fn parse(s: &str) -> Result<Self, BandwidthError> {
        let text = s.trim();
        if text.is_empty() {
            return Err(BandwidthError::Empty);
        }

        let split = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| BandwidthError::MissingUnit(text.to_string()))?;
        let (value, unit) = text.split_at(split);

        let scale: u64 = match unit.to_ascii_lowercase().as_str() {
            "bps" => 1,
            "kbps" => 1_000,
            "mbps" => 1_000_000,
            "gbps" => 1_000_000_000,
            "tbps" => 1_000_000_000_000,
            _ => return Err(BandwidthError::UnknownUnit(text.to_string())),
        };

        let bps = scaled(value, scale).ok_or_else(|| {
            if value.parse::<f64>().map(|v| v > 0.0).unwrap_or(false) {
                BandwidthError::Overflow(text.to_string())
            } else {
                BandwidthError::InvalidValue(text.to_string())
            }
        })?;
        if bps == 0 {
            return Err(BandwidthError::InvalidValue(text.to_string()));
        }

        Ok(Self {
            text: text.to_string(),
            bps,
        })
    }

    /// 原始文本（例如 `1Gbps`）
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn bps(&self) -> u64 {
        self.bps
    }
}

/// 十进制定点换算，避免浮点误差：`"2.5"` * 1e9 = 2_500_000_000
fn scaled(value: &str, scale: u64) -> Option<u64> {
    let (int_part, frac_part) = match value.split_once('.') {
        Some((i, f)) => (i, f),
        None => (value, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if !digits(int_part) || !digits(frac_part) {
        return None;
    }

    let int: u64 = if int_part.is_empty() { 0 } else { int_part.parse().ok()? };
    let mut total = int.checked_mul(scale)?;

    let mut unit = scale;
    for digit in frac_part.bytes() {
        unit /= 10;
        let d = u64::from(digit - b'0');
        if unit == 0 {
            // 小于 1bps 的部分直接截断
            break;
        }
        total = total.checked_add(d * unit)?;
    }
    Some(total)
}

impl Default for Bandwidth {
    fn default() -> Self {
        Self {
            text: "1Gbps".to_string(),
            bps: 1_000_000_000,
        }
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Bandwidth {
    type Err = BandwidthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Bandwidth {
    type Error = BandwidthError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Bandwidth> for String {
    fn from(bw: Bandwidth) -> Self {
        bw.text
    }
}
