use std::fmt;
use std::str::FromStr;

use crate::error::ZosciiError;

/// Address width shared by both ends of an exchange. Fixes the ROM size cap
/// and the width of every integer in an encoded stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bittage {
    #[default]
    Bits16,
    Bits32,
}

impl Bittage {
    /// Largest usable ROM, in bytes
    pub fn rom_cap(self) -> u64 {
        match self {
            Bittage::Bits16 => 1 << 16,
            Bittage::Bits32 => 1 << 32,
        }
    }

    /// Bytes per address on the wire
    pub fn address_width(self) -> usize {
        match self {
            Bittage::Bits16 => 2,
            Bittage::Bits32 => 4,
        }
    }

    pub fn max_address(self) -> u32 {
        match self {
            Bittage::Bits16 => u16::MAX as u32,
            Bittage::Bits32 => u32::MAX,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Bittage::Bits16 => 16,
            Bittage::Bits32 => 32,
        }
    }

    /// Recognise the `-16` / `-32` command line switches
    pub fn from_flag(flag: &str) -> Option<Bittage> {
        match flag {
            "-16" => Some(Bittage::Bits16),
            "-32" => Some(Bittage::Bits32),
            _ => None,
        }
    }
}

impl FromStr for Bittage {
    type Err = ZosciiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "16" | "-16" => Ok(Bittage::Bits16),
            "32" | "-32" => Ok(Bittage::Bits32),
            other => Err(ZosciiError::InvalidBittage(other.to_string())),
        }
    }
}

impl fmt::Display for Bittage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
