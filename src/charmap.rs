use std::fmt;
use std::str::FromStr;

use crate::error::ZosciiError;

/// Table entry for a code point with no ASCII equivalent
const NO: i16 = -1;

/// PETSCII to ASCII. Space, digits, punctuation and `@A-Z[\]^_` map directly.
#[rustfmt::skip]
static PETSCII_TO_ASCII: [i16; 256] = [
    // 0x00-0x1F: control characters
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    // 0x20-0x3F: space, digits, punctuation
    32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47,
    48, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63,
    // 0x40-0x5F: @A-Z[\]^_
    64, 65, 66, 67, 68, 69, 70, 71, 72, 73, 74, 75, 76, 77, 78, 79,
    80, 81, 82, 83, 84, 85, 86, 87, 88, 89, 90, 91, 92, 93, 94, 95,
    // 0x60-0xFF: graphics, shifted sets, colour codes
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
];

/// EBCDIC to ASCII for the printable letters, digits and common punctuation
#[rustfmt::skip]
static EBCDIC_TO_ASCII: [i16; 256] = [
    // 0x00-0x3F: control
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    // 0x40: space  . < ( + |
    32, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, 46, 60, 40, 43, 124,
    // 0x50: &  ! $ ) ;
    38, NO, NO, NO, NO, NO, NO, NO, NO, NO, 33, 36, NO, 41, 59, NO,
    // 0x60: - /  , % _ > ?
    45, 47, NO, NO, NO, NO, NO, NO, NO, NO, NO, 44, 37, 95, 62, 63,
    // 0x70: ` : # @ ' = "
    NO, NO, NO, NO, NO, NO, NO, NO, NO, 96, 58, 35, 64, 39, 61, 34,
    // 0x80: a-i
    NO, 97, 98, 99, 100, 101, 102, 103, 104, 105, NO, NO, NO, NO, NO, NO,
    // 0x90: j-r
    NO, 106, 107, 108, 109, 110, 111, 112, 113, 114, NO, NO, NO, NO, NO, NO,
    // 0xA0: s-z
    NO, NO, 115, 116, 117, 118, 119, 120, 121, 122, NO, NO, NO, NO, NO, NO,
    // 0xB0
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    // 0xC0: A-I
    NO, 65, 66, 67, 68, 69, 70, 71, 72, 73, NO, NO, NO, NO, NO, NO,
    // 0xD0: J-R
    NO, 74, 75, 76, 77, 78, 79, 80, 81, 82, NO, NO, NO, NO, NO, NO,
    // 0xE0: S-Z
    NO, NO, 83, 84, 85, 86, 87, 88, 89, 90, NO, NO, NO, NO, NO, NO,
    // 0xF0: 0-9
    48, 49, 50, 51, 52, 53, 54, 55, 56, 57, NO, NO, NO, NO, NO, NO,
];

/// CharacterMap converts a source code point to the byte value looked up in the ROM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterMap {
    #[default]
    Identity,
    Petscii,
    Ebcdic,
}

impl CharacterMap {
    /// Map `code`, returning `sentinel` when the character set has no equivalent.
    ///
    /// Identity passes every code through, even ones above 255; the encoder drops those.
    pub fn map(self, code: u32, sentinel: u32) -> u32 {
        let table = match self {
            CharacterMap::Identity => return code,
            CharacterMap::Petscii => &PETSCII_TO_ASCII,
            CharacterMap::Ebcdic => &EBCDIC_TO_ASCII,
        };
        match table.get(code as usize) {
            Some(&mapped) if mapped >= 0 => mapped as u32,
            _ => sentinel,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterMap::Identity => "ascii",
            CharacterMap::Petscii => "petscii",
            CharacterMap::Ebcdic => "ebcdic",
        }
    }
}

impl FromStr for CharacterMap {
    type Err = ZosciiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascii" | "identity" => Ok(CharacterMap::Identity),
            "petscii" => Ok(CharacterMap::Petscii),
            "ebcdic" => Ok(CharacterMap::Ebcdic),
            _ => Err(ZosciiError::InvalidCharset(s.to_string())),
        }
    }
}

impl fmt::Display for CharacterMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAR: u32 = 42;

    #[test]
    fn test_identity_passes_through() {
        assert_eq!(CharacterMap::Identity.map(0x41, STAR), 0x41);
        assert_eq!(CharacterMap::Identity.map(0, STAR), 0);
        assert_eq!(CharacterMap::Identity.map(0x263A, STAR), 0x263A);
    }

    #[test]
    fn test_petscii() {
        let m = CharacterMap::Petscii;
        assert_eq!(m.map(0x41, STAR), 0x41);
        assert_eq!(m.map(0x20, STAR), 0x20);
        assert_eq!(m.map(0x5F, STAR), 0x5F);
        assert_eq!(m.map(0x0D, STAR), STAR);
        assert_eq!(m.map(0x61, STAR), STAR);
        assert_eq!(m.map(0xC1, 999), 999);
        assert_eq!(m.map(300, STAR), STAR);
    }

    #[test]
    fn test_ebcdic() {
        let m = CharacterMap::Ebcdic;
        assert_eq!(m.map(0x40, STAR), b' ' as u32);
        assert_eq!(m.map(0x81, STAR), b'a' as u32);
        assert_eq!(m.map(0x89, STAR), b'i' as u32);
        assert_eq!(m.map(0x91, STAR), b'j' as u32);
        assert_eq!(m.map(0xA2, STAR), b's' as u32);
        assert_eq!(m.map(0xA9, STAR), b'z' as u32);
        assert_eq!(m.map(0xC1, STAR), b'A' as u32);
        assert_eq!(m.map(0xD9, STAR), b'R' as u32);
        assert_eq!(m.map(0xE9, STAR), b'Z' as u32);
        assert_eq!(m.map(0xF0, STAR), b'0' as u32);
        assert_eq!(m.map(0xF9, STAR), b'9' as u32);
        assert_eq!(m.map(0x7F, STAR), b'"' as u32);
        assert_eq!(m.map(0x4F, STAR), b'|' as u32);
        assert_eq!(m.map(0x00, STAR), STAR);
        assert_eq!(m.map(0xFF, STAR), STAR);
    }

    #[test]
    fn test_ebcdic_letters_are_complete() {
        let mapped: Vec<u8> = (0u32..256)
            .map(|c| CharacterMap::Ebcdic.map(c, 0x100))
            .filter(|&v| v < 0x100)
            .map(|v| v as u8)
            .collect();
        for c in b'a'..=b'z' {
            assert!(mapped.contains(&c), "missing {}", c as char);
        }
        for c in b'A'..=b'Z' {
            assert!(mapped.contains(&c), "missing {}", c as char);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("ASCII".parse::<CharacterMap>().unwrap(), CharacterMap::Identity);
        assert_eq!("petscii".parse::<CharacterMap>().unwrap(), CharacterMap::Petscii);
        assert!("latin1".parse::<CharacterMap>().is_err());
    }
}
