use std::fmt::{Display, Error, Formatter};
use std::ops::Range;

use log::debug;
use serde::Deserialize;

use crate::bittage::Bittage;
use crate::error::{Result, ZosciiError};

/// Rom is the reference byte array every address points into
pub struct Rom {
    bytes: Vec<u8>,
    bittage: Bittage,
    original_len: usize,
}

impl Rom {
    /// Take ownership of a loaded buffer, truncating it to the address cap
    pub fn new(mut bytes: Vec<u8>, bittage: Bittage) -> Result<Rom> {
        if bytes.is_empty() {
            return Err(ZosciiError::EmptyRom);
        }
        let original_len = bytes.len();
        let cap = bittage.rom_cap();
        if original_len as u64 > cap {
            debug!(
                "Truncating {} byte ROM to {} bytes for {} addressing",
                original_len, cap, bittage
            );
            bytes.truncate(cap as usize);
        }
        Ok(Rom {
            bytes,
            bittage,
            original_len,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// get returns the byte at an address, or None past the end
    pub fn get(&self, address: usize) -> Option<u8> {
        self.bytes.get(address).copied()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bittage(&self) -> Bittage {
        self.bittage
    }

    pub fn was_truncated(&self) -> bool {
        self.original_len > self.bytes.len()
    }

    pub fn original_len(&self) -> usize {
        self.original_len
    }
}

impl Display for Rom {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), Error> {
        write!(f, "{} bytes ({} addressing", self.len(), self.bittage)?;
        if self.was_truncated() {
            write!(f, ", truncated from {} bytes", self.original_len)?;
        }
        write!(f, ")")
    }
}

/// MemoryBlock is a half-open range `[start, start + size)` of eligible ROM addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MemoryBlock {
    pub start: usize,
    pub size: usize,
}

impl MemoryBlock {
    pub fn new(start: usize, size: usize) -> MemoryBlock {
        MemoryBlock { start, size }
    }

    /// The implicit block covering an entire ROM
    pub fn whole(rom_len: usize) -> MemoryBlock {
        MemoryBlock {
            start: 0,
            size: rom_len,
        }
    }

    /// clip returns the addresses of this block that exist in a ROM of `rom_len` bytes
    pub fn clip(&self, rom_len: usize) -> Range<usize> {
        let end = self.start.saturating_add(self.size).min(rom_len);
        let start = self.start.min(end);
        start..end
    }

    /// Parse the `start:size` command line form; either part may be hex with a 0x prefix
    pub fn parse(spec: &str) -> Result<MemoryBlock> {
        let (start, size) = spec
            .split_once(':')
            .ok_or_else(|| ZosciiError::Usage(format!("Invalid block '{}': expected start:size", spec)))?;
        Ok(MemoryBlock {
            start: parse_number(start)?,
            size: parse_number(size)?,
        })
    }
}

impl Display for MemoryBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), Error> {
        if self.size == 0 {
            return write!(f, "{:#06x} (empty)", self.start);
        }
        write!(
            f,
            "{:#06x}-{:#06x} ({} bytes)",
            self.start,
            self.start.saturating_add(self.size - 1),
            self.size
        )
    }
}

fn parse_number(text: &str) -> Result<usize> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => text.parse::<usize>(),
    };
    parsed.map_err(|_| ZosciiError::Usage(format!("Invalid number '{}'", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_to_16_bit_cap() {
        let rom = Rom::new(vec![7u8; 70_000], Bittage::Bits16).unwrap();
        assert_eq!(rom.len(), 65_536);
        assert!(rom.was_truncated());
        assert_eq!(rom.original_len(), 70_000);
        assert_eq!(rom.get(65_535), Some(7));
        assert_eq!(rom.get(65_536), None);
    }

    #[test]
    fn test_32_bit_keeps_everything() {
        let rom = Rom::new(vec![1u8; 70_000], Bittage::Bits32).unwrap();
        assert_eq!(rom.len(), 70_000);
        assert!(!rom.was_truncated());
    }

    #[test]
    fn test_empty_rom_is_fatal() {
        assert!(matches!(
            Rom::new(Vec::new(), Bittage::Bits16),
            Err(ZosciiError::EmptyRom)
        ));
    }

    #[test]
    fn test_clip() {
        assert_eq!(MemoryBlock::new(2, 4).clip(10), 2..6);
        assert_eq!(MemoryBlock::new(8, 4).clip(10), 8..10);
        assert!(MemoryBlock::new(12, 4).clip(10).is_empty());
        assert!(MemoryBlock::new(3, 0).clip(10).is_empty());
        assert_eq!(MemoryBlock::new(usize::MAX, 5).clip(10), 10..10);
    }

    #[test]
    fn test_parse_block() {
        assert_eq!(MemoryBlock::parse("0x40:256").unwrap(), MemoryBlock::new(0x40, 256));
        assert_eq!(MemoryBlock::parse("0:0x10").unwrap(), MemoryBlock::new(0, 16));
        assert!(MemoryBlock::parse("12").is_err());
        assert!(MemoryBlock::parse("a:b").is_err());
    }
}
