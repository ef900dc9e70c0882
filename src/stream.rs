//! Wire format for encoded messages: a flat run of little-endian addresses, 2 or 4 bytes
//! each depending on the bittage, with no header and no terminator.

use std::io::{self, ErrorKind, Read, Write};

use log::warn;

use crate::bittage::Bittage;
use crate::error::{Result, ZosciiError};

/// Write every address at the width fixed by `bittage`
pub fn write_addresses<W: Write>(addresses: &[u32], bittage: Bittage, mut out: W) -> Result<()> {
    for &address in addresses {
        if address > bittage.max_address() {
            return Err(ZosciiError::AddressOutOfRange {
                address,
                bits: bittage.bits(),
            });
        }
        match bittage {
            Bittage::Bits16 => out.write_all(&(address as u16).to_le_bytes())?,
            Bittage::Bits32 => out.write_all(&address.to_le_bytes())?,
        }
    }
    out.flush()?;
    Ok(())
}

pub fn encode_to_vec(addresses: &[u32], bittage: Bittage) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(addresses.len() * bittage.address_width());
    write_addresses(addresses, bittage, &mut out)?;
    Ok(out)
}

/// Parse an in-memory stream. A trailing partial address is ignored.
pub fn read_addresses(stream: &[u8], bittage: Bittage) -> Vec<u32> {
    let width = bittage.address_width();
    if stream.len() % width != 0 {
        warn!(
            "Ignoring {} trailing byte(s) of a partial {} address",
            stream.len() % width,
            bittage
        );
    }
    stream
        .chunks_exact(width)
        .map(|chunk| match bittage {
            Bittage::Bits16 => u16::from_le_bytes([chunk[0], chunk[1]]) as u32,
            Bittage::Bits32 => u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
        })
        .collect()
}

/// AddressReader yields addresses from a byte stream one at a time
pub struct AddressReader<R: Read> {
    inner: R,
    bittage: Bittage,
    done: bool,
}

impl<R: Read> AddressReader<R> {
    pub fn new(inner: R, bittage: Bittage) -> Self {
        AddressReader {
            inner,
            bittage,
            done: false,
        }
    }

    /// Fill `buf` completely, returning how many bytes were read before end of stream
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for AddressReader<R> {
    type Item = Result<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let width = self.bittage.address_width();
        let mut buf = [0u8; 4];
        match self.fill(&mut buf[..width]) {
            Ok(n) if n == width => Some(Ok(u32::from_le_bytes(buf))),
            Ok(n) => {
                if n > 0 {
                    warn!("Ignoring {} trailing byte(s) of a partial {} address", n, self.bittage);
                }
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}
