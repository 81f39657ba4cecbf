mod decode;
pub use decode::*;

use rand::prelude::*;
use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MaskingKey(pub [u8; 4]);

impl MaskingKey {
    pub const DEFAULT: MaskingKey = MaskingKey([0xDE, 0xAD, 0xBE, 0xEF]);
    pub const ZERO: MaskingKey = MaskingKey([0u8; 4]);

    pub fn random() -> Self {
        Self(StdRng::from_entropy().next_u32().to_ne_bytes())
    }
    pub fn bytes(&self) -> [u8; 4] {
        self.0
    }
}

impl Default for MaskingKey {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for MaskingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{:02x}{:02x}{:02x}{:02x}", a, b, c, d)
    }
}

impl FromStr for MaskingKey {
    type Err = MaskingKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != 8 {
            return Err(MaskingKeyParseError::Length(s.to_string()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(MaskingKeyParseError::Digit(s.to_string()));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| MaskingKeyParseError::Digit(s.to_string()))?;
        Ok(Self(value.to_be_bytes()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MaskingKeyParseError {
    #[error("masking key {0:?} must be exactly 8 hex digits")]
    Length(String),
    #[error("masking key {0:?} contains a non-hex digit")]
    Digit(String),
}

// XORs a single payload byte at zero-based `position` with the matching key byte. Masking and
// unmasking are the same operation.
pub fn apply(byte: u8, position: u64, key: MaskingKey) -> u8 {
    byte ^ key.0[(position & 3) as usize]
}

// Masks or unmasks a buffer with payload bytes. The offset is the offset of the buffer within the
// frames payload segment. Any multiple of 4 may be added to or subtracted from the offset without
// any effect on the result.
pub fn mask(mask: MaskingKey, mut offset: u64, buffer: &mut [u8]) {
    if mask != MaskingKey::ZERO {
        for byte in buffer.iter_mut() {
            *byte = apply(*byte, offset, mask);
            offset = offset.wrapping_add(1);
        }
    }
}
