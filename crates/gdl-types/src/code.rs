use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Parse a numeric type code.
///
/// Accepts hexadecimal with a `0x`/`0X` prefix (`"0x0a00"`) or plain decimal
/// (`"2560"`). Surrounding whitespace is ignored.
pub fn parse_type_code(s: &str) -> Result<u64, TypeError> {
    let trimmed = s.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => trimmed.parse::<u64>(),
    };
    parsed.map_err(|_| TypeError::InvalidTypeCode(s.to_string()))
}

fn parse_bounded(s: &str, max: u64) -> Result<u64, TypeError> {
    let value = parse_type_code(s)?;
    if value > max {
        return Err(TypeError::CodeOutOfRange { value, max });
    }
    Ok(value)
}

/// Type code of a game object (items are objects too).
///
/// Rendered in hex, matching the `type="0x…"` attributes of object documents.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectType(pub u16);

impl ObjectType {
    /// The raw 16-bit code.
    pub fn code(&self) -> u16 {
        self.0
    }
}

impl FromStr for ObjectType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bounded(s, u16::MAX as u64).map(|v| Self(v as u16))
    }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectType({self})")
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

/// Type code of a ground tile.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileType(pub u16);

impl TileType {
    /// The raw 16-bit code.
    pub fn code(&self) -> u16 {
        self.0
    }
}

impl FromStr for TileType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bounded(s, u16::MAX as u64).map(|v| Self(v as u16))
    }
}

impl fmt::Debug for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileType({self})")
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

/// Wire identifier of a network packet. Rendered in decimal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PacketId(pub u8);

impl PacketId {
    pub fn code(&self) -> u8 {
        self.0
    }
}

impl FromStr for PacketId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bounded(s, u8::MAX as u64).map(|v| Self(v as u8))
    }
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
