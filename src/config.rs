//! Encoding profiles.
//!
//! A profile is a small TOML file holding the settings both ends of an exchange must
//! agree on, so they do not have to be repeated on every command line:
//!
//! ```toml
//! bittage = 32
//! charset = "petscii"
//! unmappable = 42
//! fallback = "sentinel"
//!
//! [[blocks]]
//! start = 0x40
//! size = 4096
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::bittage::Bittage;
use crate::charmap::CharacterMap;
use crate::encoder::Fallback;
use crate::error::{Result, ZosciiError};
use crate::rom::MemoryBlock;

/// Sentinel used when none is configured: `*`
pub const DEFAULT_UNMAPPABLE: u32 = 42;

/// RawProfile mirrors the file layout; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProfile {
    bittage: Option<u32>,
    charset: Option<String>,
    unmappable: Option<u32>,
    fallback: Option<String>,
    seed: Option<u64>,
    #[serde(default)]
    blocks: Vec<MemoryBlock>,
}

/// Profile holds validated encoding settings
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub bittage: Bittage,
    pub charset: CharacterMap,
    pub unmappable: u32,
    pub fallback: Fallback,
    /// Fixed seed for reproducible encodings; thread-random when unset
    pub seed: Option<u64>,
    /// Eligible ROM ranges; the whole ROM when empty
    pub blocks: Vec<MemoryBlock>,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            bittage: Bittage::default(),
            charset: CharacterMap::default(),
            unmappable: DEFAULT_UNMAPPABLE,
            fallback: Fallback::default(),
            seed: None,
            blocks: Vec::new(),
        }
    }
}

impl Profile {
    pub fn from_toml_str(text: &str) -> Result<Profile> {
        let raw: RawProfile =
            toml::from_str(text).map_err(|e| ZosciiError::Config(e.to_string()))?;

        let mut profile = Profile::default();
        if let Some(bits) = raw.bittage {
            profile.bittage = bits.to_string().parse()?;
        }
        if let Some(charset) = raw.charset {
            profile.charset = charset.parse()?;
        }
        if let Some(unmappable) = raw.unmappable {
            profile.unmappable = unmappable;
        }
        if let Some(fallback) = raw.fallback {
            profile.fallback = fallback.parse()?;
        }
        profile.seed = raw.seed;
        profile.blocks = raw.blocks;
        Ok(profile)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Profile> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            ZosciiError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let profile = Profile::from_toml_str(&text)?;
        debug!("Loaded profile from {}: {:?}", path.display(), profile);
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_uses_defaults() {
        let p = Profile::from_toml_str("").unwrap();
        assert_eq!(p, Profile::default());
        assert_eq!(p.bittage, Bittage::Bits16);
        assert_eq!(p.unmappable, 42);
        assert!(p.blocks.is_empty());
    }

    #[test]
    fn test_full_profile() {
        let p = Profile::from_toml_str(
            r#"
            bittage = 32
            charset = "ebcdic"
            unmappable = 63
            fallback = "sentinel"
            seed = 99

            [[blocks]]
            start = 0x40
            size = 256

            [[blocks]]
            start = 1024
            size = 16
            "#,
        )
        .unwrap();
        assert_eq!(p.bittage, Bittage::Bits32);
        assert_eq!(p.charset, CharacterMap::Ebcdic);
        assert_eq!(p.unmappable, 63);
        assert_eq!(p.fallback, Fallback::Sentinel);
        assert_eq!(p.seed, Some(99));
        assert_eq!(
            p.blocks,
            vec![MemoryBlock::new(0x40, 256), MemoryBlock::new(1024, 16)]
        );
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(matches!(
            Profile::from_toml_str("bittage = 8"),
            Err(ZosciiError::InvalidBittage(_))
        ));
        assert!(matches!(
            Profile::from_toml_str("charset = \"klingon\""),
            Err(ZosciiError::InvalidCharset(_))
        ));
        assert!(matches!(
            Profile::from_toml_str("colour = \"red\""),
            Err(ZosciiError::Config(_))
        ));
        assert!(matches!(
            Profile::from_toml_str("bittage = "),
            Err(ZosciiError::Config(_))
        ));
    }
}
