use std::io::{BufWriter, Read, Write};

use log::{debug, trace};

use crate::error::Result;
use crate::rom::Rom;
use crate::stream::{read_addresses, AddressReader};

/// DecodeStats counts what a streaming decode produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub decoded: usize,
    /// Addresses at or past the end of the ROM, which produce no byte
    pub skipped: usize,
}

/// Look every address up in the ROM, skipping those outside it
pub fn decode_addresses(addresses: &[u32], rom: &Rom) -> Vec<u8> {
    let mut out = Vec::with_capacity(addresses.len());
    for &address in addresses {
        match rom.get(address as usize) {
            Some(b) => out.push(b),
            None => trace!("Skipping address {:#x} past end of ROM", address),
        }
    }
    out
}

/// Decode an in-memory stream written at the ROM's bittage
pub fn decode_stream(stream: &[u8], rom: &Rom) -> Vec<u8> {
    decode_addresses(&read_addresses(stream, rom.bittage()), rom)
}

/// Decode from a reader into a writer without holding the whole stream in memory
pub fn decode_reader<R: Read, W: Write>(input: R, rom: &Rom, output: W) -> Result<DecodeStats> {
    let mut writer = BufWriter::new(output);
    let mut stats = DecodeStats::default();
    for address in AddressReader::new(input, rom.bittage()) {
        let address = address?;
        match rom.get(address as usize) {
            Some(b) => {
                writer.write_all(&[b])?;
                stats.decoded += 1;
            }
            None => stats.skipped += 1,
        }
    }
    writer.flush()?;
    debug!(
        "Decoded {} byte(s), skipped {} out-of-range address(es)",
        stats.decoded, stats.skipped
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bittage::Bittage;
    use crate::stream::encode_to_vec;

    #[test]
    fn test_decode_abac() {
        let rom = Rom::new(b"ABAC".to_vec(), Bittage::Bits16).unwrap();
        assert_eq!(decode_addresses(&[2, 0, 1, 3], &rom), b"AABC");
    }

    #[test]
    fn test_out_of_range_addresses_skipped() {
        let rom = Rom::new(b"ABAC".to_vec(), Bittage::Bits16).unwrap();
        assert_eq!(decode_addresses(&[4, 1, 65_535, 3], &rom), b"BC");
    }

    #[test]
    fn test_decode_stream_uses_rom_bittage() {
        let rom = Rom::new(b"xyz".to_vec(), Bittage::Bits32).unwrap();
        let stream = encode_to_vec(&[2, 0, 1_000_000, 1], Bittage::Bits32).unwrap();
        assert_eq!(decode_stream(&stream, &rom), b"zxy");
    }

    #[test]
    fn test_decode_reader_counts() {
        let rom = Rom::new(b"ABAC".to_vec(), Bittage::Bits16).unwrap();
        let stream = encode_to_vec(&[3, 9, 0], Bittage::Bits16).unwrap();
        let mut out = Vec::new();
        let stats = decode_reader(stream.as_slice(), &rom, &mut out).unwrap();
        assert_eq!(out, b"CA");
        assert_eq!(stats, DecodeStats { decoded: 2, skipped: 1 });
    }

    #[test]
    fn test_truncated_rom_rejects_high_addresses() {
        let rom = Rom::new(vec![b'q'; 70_000], Bittage::Bits16).unwrap();
        assert_eq!(decode_addresses(&[65_535, 65_536, 69_999], &rom), b"q");
    }
}
