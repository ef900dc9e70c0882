use std::str::FromStr;

use log::{debug, info};

use crate::charmap::CharacterMap;
use crate::error::ZosciiError;
use crate::index::{ByteIndex, Histogram};
use crate::zrand::AddressPicker;

/// How many dropped symbols are logged individually before the encoder goes quiet
const MISSING_LOG_LIMIT: usize = 10;

/// Fallback decides what happens to a symbol whose mapped byte is absent from the ROM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// Drop the symbol and count it as missing
    #[default]
    Drop,
    /// Retry once with the unmappable sentinel, dropping only if that is absent too
    Sentinel,
}

impl FromStr for Fallback {
    type Err = ZosciiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(Fallback::Drop),
            "sentinel" => Ok(Fallback::Sentinel),
            _ => Err(ZosciiError::InvalidFallback(s.to_string())),
        }
    }
}

/// Encoding is the outcome of one encode call.
///
/// Dropped symbols are not an error. Callers that need every symbol encoded must check
/// `missing` (or `is_lossless`) themselves.
#[derive(Debug, Clone)]
pub struct Encoding {
    /// One ROM address per encoded symbol, in input order
    pub addresses: Vec<u32>,
    pub matched: usize,
    pub missing: usize,
    /// Symbols encoded as the sentinel after their own byte was absent
    pub substituted: usize,
    /// Per byte value, how many symbols were encoded as that value
    pub input_counts: Histogram,
    pub rom_counts: Histogram,
}

impl Encoding {
    pub fn is_lossless(&self) -> bool {
        self.missing == 0 && self.substituted == 0
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Encoder turns symbols into randomly chosen ROM addresses holding the same byte
pub struct Encoder<'a, 'r> {
    index: &'a ByteIndex<'r>,
    charmap: CharacterMap,
    sentinel: u32,
    fallback: Fallback,
}

impl<'a, 'r> Encoder<'a, 'r> {
    pub fn new(index: &'a ByteIndex<'r>, charmap: CharacterMap, sentinel: u32) -> Self {
        Encoder {
            index,
            charmap,
            sentinel,
            fallback: Fallback::Drop,
        }
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Encode raw bytes, each byte being one source code
    pub fn encode_bytes<P: AddressPicker>(&self, input: &[u8], picker: &mut P) -> Encoding {
        self.encode_codes(input.iter().map(|&b| b as u32), picker)
    }

    /// Encode text, each Unicode scalar value being one source code
    pub fn encode_str<P: AddressPicker>(&self, input: &str, picker: &mut P) -> Encoding {
        self.encode_codes(input.chars().map(|c| c as u32), picker)
    }

    /// Encode a sequence of source codes.
    ///
    /// A symbol that maps outside 0-255, or to a byte with no ROM address, is dropped
    /// and leaves no entry in the output.
    pub fn encode_codes<I, P>(&self, codes: I, picker: &mut P) -> Encoding
    where
        I: IntoIterator<Item = u32>,
        P: AddressPicker,
    {
        let codes = codes.into_iter();
        let mut addresses = Vec::with_capacity(codes.size_hint().0);
        let mut input_counts = Histogram::new();
        let mut missing = 0;
        let mut substituted = 0;

        for code in codes {
            let mapped = self.charmap.map(code, self.sentinel);
            let target = match self.candidate(mapped) {
                Some(value) => Some(value),
                None if self.fallback == Fallback::Sentinel && mapped != self.sentinel => {
                    let fallback = self.candidate(self.sentinel);
                    if fallback.is_some() {
                        substituted += 1;
                    }
                    fallback
                }
                None => None,
            };

            let Some(value) = target else {
                missing += 1;
                if missing <= MISSING_LOG_LIMIT {
                    debug!("Missing character: code {} -> {}", code, mapped);
                }
                continue;
            };

            let candidates = self.index.addresses(value);
            addresses.push(candidates[picker.pick(candidates.len())]);
            input_counts.add(value);
        }

        let matched = addresses.len();
        info!(
            "Encoded {} symbol(s) with {} charset: {} found in ROM, {} missing, {} substituted",
            matched + missing,
            self.charmap,
            matched,
            missing,
            substituted
        );

        Encoding {
            addresses,
            matched,
            missing,
            substituted,
            input_counts,
            rom_counts: self.index.histogram().clone(),
        }
    }

    /// candidate returns the byte to encode when `mapped` is a byte value present in the ROM
    fn candidate(&self, mapped: u32) -> Option<u8> {
        let value = u8::try_from(mapped).ok()?;
        self.index.is_encodable(value).then_some(value)
    }
}
