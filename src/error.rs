// ZOSCII Error Handling

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ZosciiError {
    // Input buffers
    EmptyRom,

    // Mode and character set selection
    InvalidBittage(String),
    InvalidCharset(String),
    InvalidFallback(String),

    // Wire format
    AddressOutOfRange { address: u32, bits: u32 },

    // Profiles and command line
    Config(String),
    Usage(String),

    // IO errors
    Io(io::Error),
}

impl fmt::Display for ZosciiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ZosciiError::EmptyRom => write!(f, "ROM buffer is empty"),
            ZosciiError::InvalidBittage(value) => {
                write!(f, "Invalid address width '{}': expected 16 or 32", value)
            }
            ZosciiError::InvalidCharset(value) => {
                write!(
                    f,
                    "Unknown character set '{}': expected ascii, petscii or ebcdic",
                    value
                )
            }
            ZosciiError::InvalidFallback(value) => {
                write!(f, "Unknown fallback '{}': expected drop or sentinel", value)
            }
            ZosciiError::AddressOutOfRange { address, bits } => {
                write!(
                    f,
                    "Address {:#x} does not fit in a {}-bit stream",
                    address, bits
                )
            }
            ZosciiError::Config(msg) => write!(f, "Profile error: {}", msg),
            ZosciiError::Usage(msg) => write!(f, "{}", msg),
            ZosciiError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ZosciiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ZosciiError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ZosciiError {
    fn from(e: io::Error) -> Self {
        ZosciiError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, ZosciiError>;
