use std::fmt::{Debug, Display, Error, Formatter};

use log::{debug, trace};

use crate::rom::{MemoryBlock, Rom};

/// Histogram counts occurrences of each of the 256 byte values
#[derive(Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; 256],
}

impl Default for Histogram {
    fn default() -> Self {
        Histogram { counts: [0; 256] }
    }
}

impl Histogram {
    pub fn new() -> Histogram {
        Histogram::default()
    }

    /// Count every byte of an arbitrary buffer
    pub fn from_bytes(bytes: &[u8]) -> Histogram {
        let mut h = Histogram::new();
        for &b in bytes {
            h.add(b);
        }
        h
    }

    /// Count the ROM bytes inside `blocks`, or the whole ROM when no blocks are given.
    /// An address covered by two blocks is counted twice.
    pub fn from_rom(rom: &Rom, blocks: &[MemoryBlock]) -> Histogram {
        let mut h = Histogram::new();
        let bytes = rom.bytes();
        for_each_block(rom.len(), blocks, |range| {
            for &b in &bytes[range] {
                h.add(b);
            }
        });
        h
    }

    pub fn add(&mut self, value: u8) {
        self.counts[value as usize] += 1;
    }

    pub fn count(&self, value: u8) -> u64 {
        self.counts[value as usize]
    }

    /// Number of byte values seen at least once
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// iter_present yields `(value, count)` for every value with a nonzero count, in value order
    pub fn iter_present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(v, &c)| (v as u8, c))
    }

    pub fn as_array(&self) -> &[u64; 256] {
        &self.counts
    }
}

impl Debug for Histogram {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.debug_map().entries(self.iter_present()).finish()
    }
}

/// ByteIndex lists, for every byte value, each eligible ROM address holding that value
pub struct ByteIndex<'a> {
    rom: &'a Rom,
    histogram: Histogram,
    addresses: Vec<Vec<u32>>,
    blocks: Vec<MemoryBlock>,
}

impl<'a> ByteIndex<'a> {
    /// Build the index over `blocks`, or over the whole ROM when `blocks` is empty.
    ///
    /// Counts first, then sizes every address list to its exact count, then fills them,
    /// so no list ever grows past its first allocation.
    pub fn build(rom: &'a Rom, blocks: &[MemoryBlock]) -> ByteIndex<'a> {
        let blocks: Vec<MemoryBlock> = if blocks.is_empty() {
            vec![MemoryBlock::whole(rom.len())]
        } else {
            blocks.to_vec()
        };

        // Pass 1: count
        let histogram = Histogram::from_rom(rom, &blocks);

        // Pass 2: allocate
        let mut addresses: Vec<Vec<u32>> = histogram
            .as_array()
            .iter()
            .map(|&c| Vec::with_capacity(c as usize))
            .collect();

        // Pass 3: fill
        let bytes = rom.bytes();
        for_each_block(rom.len(), &blocks, |range| {
            for address in range {
                addresses[bytes[address] as usize].push(address as u32);
            }
        });

        debug!(
            "Indexed {} addresses across {} block(s): {} distinct byte values",
            histogram.total(),
            blocks.len(),
            histogram.distinct()
        );

        ByteIndex {
            rom,
            histogram,
            addresses,
            blocks,
        }
    }

    /// addresses returns every candidate address for `value`, in scan order
    pub fn addresses(&self, value: u8) -> &[u32] {
        &self.addresses[value as usize]
    }

    pub fn is_encodable(&self, value: u8) -> bool {
        !self.addresses[value as usize].is_empty()
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn rom(&self) -> &'a Rom {
        self.rom
    }

    pub fn blocks(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Total addresses visited while indexing, duplicates from overlapping blocks included
    pub fn scanned(&self) -> u64 {
        self.histogram.total()
    }
}

impl<'a> Display for ByteIndex<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        writeln!(f, "ROM: {}", self.rom)?;
        writeln!(f, "Memory blocks: {}", self.blocks.len())?;
        for (i, block) in self.blocks.iter().enumerate() {
            writeln!(f, "  Block {}: {}", i, block)?;
        }
        write!(
            f,
            "Indexed addresses: {} ({} distinct byte values)",
            self.scanned(),
            self.histogram.distinct()
        )
    }
}

/// Visit the clipped range of every block, skipping ranges that fall entirely outside the ROM
fn for_each_block<F>(rom_len: usize, blocks: &[MemoryBlock], mut visit: F)
where
    F: FnMut(std::ops::Range<usize>),
{
    let whole = [MemoryBlock::whole(rom_len)];
    let blocks = if blocks.is_empty() { &whole[..] } else { blocks };
    for block in blocks {
        let range = block.clip(rom_len);
        if range.is_empty() {
            trace!("Block {} contributes no addresses", block);
            continue;
        }
        visit(range);
    }
}
