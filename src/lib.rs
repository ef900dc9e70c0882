//! ZOSCII address-substitution encoding.
//!
//! A message is encoded as a sequence of addresses into a reference byte array (the ROM).
//! Each address holds the byte it stands for, and the encoder picks one of the candidate
//! addresses at random per symbol, so the same message encodes differently every run.
//!
//! ```
//! use zoscii::{ByteIndex, Bittage, CharacterMap, Encoder, Rom, ZRand};
//!
//! let rom = Rom::new(b"ABAC".to_vec(), Bittage::Bits16).unwrap();
//! let index = ByteIndex::build(&rom, &[]);
//! let encoding = Encoder::new(&index, CharacterMap::Identity, 42)
//!     .encode_str("AAB", &mut ZRand::new_predictable(1));
//! assert_eq!(zoscii::decode_addresses(&encoding.addresses, &rom), b"AAB");
//! ```

pub mod bittage;
pub mod charmap;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod index;
pub mod report;
pub mod rom;
pub mod stream;
pub mod strength;
pub mod zrand;

pub use bittage::Bittage;
pub use charmap::CharacterMap;
pub use config::Profile;
pub use decoder::{decode_addresses, decode_reader, decode_stream, DecodeStats};
pub use encoder::{Encoder, Encoding, Fallback};
pub use error::{Result, ZosciiError};
pub use index::{ByteIndex, Histogram};
pub use rom::{MemoryBlock, Rom};
pub use strength::{analyze, analyze_input, RomSurvey, StrengthMetrics};
pub use zrand::{AddressPicker, RandMode, ZRand};
