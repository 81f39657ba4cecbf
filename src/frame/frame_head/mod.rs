mod decode;

pub use decode::*;

use crate::frame::{FramePayloadReader, MaskingKey};
use std::fmt;
use std::io::Read;

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Opcode {
    Text,
    Binary,
    // Any other nibble found in the first head byte while decoding.
    #[strum(disabled)]
    Other(u8),
}

impl Opcode {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x0F {
            0x1 => Opcode::Text,
            0x2 => Opcode::Binary,
            n => Opcode::Other(n),
        }
    }
    pub fn bits(&self) -> u8 {
        match self {
            Opcode::Text => 0x1,
            Opcode::Binary => 0x2,
            Opcode::Other(n) => n & 0x0F,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::Text => f.write_str("text"),
            Opcode::Binary => f.write_str("binary"),
            Opcode::Other(n) => write!(f, "opcode {:#x}", n),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameHead {
    pub fin: bool,
    // RSV1..RSV3 as the low three bits. Never validated.
    pub rsv: u8,
    pub opcode: Opcode,
    pub mask: Option<MaskingKey>,
    pub payload_len: u64,
}

impl FrameHead {
    pub fn new(opcode: Opcode, mask: Option<MaskingKey>, payload_len: u64) -> Self {
        Self {
            fin: true,
            rsv: 0,
            opcode,
            mask,
            payload_len,
        }
    }
    pub fn payload_reader<T: Read>(self, transport: T) -> FramePayloadReader<T> {
        FramePayloadReader::new(transport, self.mask, self.payload_len)
    }
    pub fn parse(buffer: &[u8]) -> Result<FrameHead, FrameHeadParseError> {
        if buffer.len() < 2 {
            return Err(FrameHeadParseError::Incomplete(2));
        }
        let masked = buffer[1] & 0x80 != 0;
        let extra_payload_len_bytes = match buffer[1] & 0x7F {
            0..=125 => 0usize,
            126 => 2usize,
            _ => 8usize,
        };
        let expected_buffer_len = 2 + extra_payload_len_bytes + (masked as usize) * 4;
        if buffer.len() < expected_buffer_len {
            return Err(FrameHeadParseError::Incomplete(expected_buffer_len));
        }
        let mut payload_len = [0u8; 8];
        match extra_payload_len_bytes {
            0 => payload_len[7] = buffer[1] & 0x7F,
            2 => payload_len[6..8].copy_from_slice(&buffer[2..4]),
            8 => payload_len.copy_from_slice(&buffer[2..10]),
            _ => unreachable!(),
        };
        let mask = match masked {
            true => {
                let mut key = [0u8; 4];
                key.copy_from_slice(
                    &buffer[2 + extra_payload_len_bytes..6 + extra_payload_len_bytes],
                );
                Some(MaskingKey(key))
            }
            false => None,
        };
        Ok(FrameHead {
            fin: buffer[0] & 0x80 != 0,
            rsv: (buffer[0] >> 4) & 0x07,
            opcode: Opcode::from_bits(buffer[0]),
            mask,
            payload_len: u64::from_be_bytes(payload_len),
        })
    }
    // Length of the encoded frame head in bytes ([2..14]).
    pub fn len_bytes(&self) -> usize {
        let extra_payload_len_bytes = match self.payload_len {
            0..=125 => 0usize,
            126..=65535 => 2usize,
            _ => 8usize,
        };
        2 + extra_payload_len_bytes + self.masked() as usize * 4
    }
    pub fn masked(&self) -> bool {
        self.mask.is_some()
    }
    // The mask applied to the payload. Unmasked frames use the all-zero key, which is the identity.
    pub fn effective_mask(&self) -> MaskingKey {
        self.mask.unwrap_or(MaskingKey::ZERO)
    }
    // Writes the frame head to `buffer` and returns the number of bytes written. Panics if
    // `buffer` is too small. See [len_bytes()][`Self::len_bytes()`].
    pub fn encode(&self, buffer: &mut [u8]) -> usize {
        buffer[0] = (self.fin as u8) << 7 | (self.rsv & 0x07) << 4 | self.opcode.bits();
        let mut offset = 2;
        buffer[1] = match self.payload_len {
            0..=125 => self.payload_len as u8,
            126..=65535 => {
                buffer[2..4].copy_from_slice(&(self.payload_len as u16).to_be_bytes());
                offset += 2;
                126u8
            }
            _ => {
                buffer[2..10].copy_from_slice(&self.payload_len.to_be_bytes());
                offset += 8;
                127u8
            }
        };
        if let Some(MaskingKey(key)) = self.mask {
            buffer[offset..offset + 4].copy_from_slice(&key);
            buffer[1] |= 0x80;
            offset += 4;
        }
        offset
    }
    pub fn encode_vec(&self) -> Vec<u8> {
        let mut buffer = vec![0u8; self.len_bytes()];
        self.encode(&mut buffer);
        buffer
    }
    // Shape problems that do not stop processing: anything other than a final text or binary frame
    // without reserved bits, and a missing mask.
    pub fn anomalies(&self) -> Vec<FrameHeadAnomaly> {
        let mut anomalies = Vec::new();
        let well_formed = self.fin
            && self.rsv == 0
            && matches!(self.opcode, Opcode::Text | Opcode::Binary);
        if !well_formed {
            anomalies.push(FrameHeadAnomaly::MalformedOpcodeOrFlags(self.first_byte()));
        }
        if !self.masked() {
            anomalies.push(FrameHeadAnomaly::UnmaskedFrameEncountered);
        }
        anomalies
    }
    fn first_byte(&self) -> u8 {
        (self.fin as u8) << 7 | (self.rsv & 0x07) << 4 | self.opcode.bits()
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FrameHeadParseError {
    #[error("incomplete, need at least {0} bytes")]
    Incomplete(usize),
}

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameHeadAnomaly {
    #[error("unexpected first head byte {0:#04x}, expected a final text or binary frame")]
    MalformedOpcodeOrFlags(u8),
    #[error("frame is not masked, using the all-zero key")]
    UnmaskedFrameEncountered,
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: MaskingKey = MaskingKey([0xDE, 0xAD, 0xBE, 0xEF]);

    fn encoded(payload_len: u64) -> Vec<u8> {
        FrameHead::new(Opcode::Binary, Some(KEY), payload_len).encode_vec()
    }

    #[test]
    fn seven_bit_length_up_to_125() {
        let head = encoded(125);
        assert_eq!(head, [0x82, 0x80 | 125, 0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn sixteen_bit_length_from_126() {
        let head = encoded(126);
        assert_eq!(head, [0x82, 0xFE, 0x00, 126, 0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn sixteen_bit_length_up_to_65535() {
        let head = encoded(65535);
        assert_eq!(head, [0x82, 0xFE, 0xFF, 0xFF, 0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn sixty_four_bit_length_from_65536() {
        let head = encoded(65536);
        assert_eq!(
            head,
            [0x82, 0xFF, 0, 0, 0, 0, 0, 1, 0, 0, 0xDE, 0xAD, 0xBE, 0xEF]
        );
    }

    #[test]
    fn len_bytes_matches_encoding() {
        for len in [0u64, 125, 126, 65535, 65536, u32::MAX as u64 + 7] {
            let head = FrameHead::new(Opcode::Text, Some(KEY), len);
            assert_eq!(head.len_bytes(), head.encode_vec().len());
            let unmasked = FrameHead::new(Opcode::Text, None, len);
            assert_eq!(unmasked.len_bytes() + 4, head.len_bytes());
        }
    }

    #[test]
    fn text_opcode() {
        let head = FrameHead::new(Opcode::Text, Some(KEY), 0).encode_vec();
        assert_eq!(head, [0x81, 0x80, 0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn parse_reports_missing_bytes() {
        assert_eq!(FrameHead::parse(&[]), Err(FrameHeadParseError::Incomplete(2)));
        assert_eq!(
            FrameHead::parse(&[0x82, 0xFE, 0x00]),
            Err(FrameHeadParseError::Incomplete(8))
        );
        assert_eq!(
            FrameHead::parse(&[0x82, 0x7F, 0, 0]),
            Err(FrameHeadParseError::Incomplete(10))
        );
    }

    #[test]
    fn parse_inverts_encode() {
        for len in [0u64, 2, 125, 126, 65535, 65536, 1 << 40] {
            let head = FrameHead::new(Opcode::Binary, Some(KEY), len);
            assert_eq!(FrameHead::parse(&head.encode_vec()), Ok(head));
        }
    }

    #[test]
    fn parse_keeps_unexpected_flags() {
        let head = FrameHead::parse(&[0x73, 0x05]).unwrap();
        assert!(!head.fin);
        assert_eq!(head.rsv, 0x07);
        assert_eq!(head.opcode, Opcode::Other(3));
        assert_eq!(head.mask, None);
        assert_eq!(head.payload_len, 5);
        assert_eq!(
            head.anomalies(),
            vec![
                FrameHeadAnomaly::MalformedOpcodeOrFlags(0x73),
                FrameHeadAnomaly::UnmaskedFrameEncountered
            ]
        );
    }

    #[test]
    fn well_formed_head_has_no_anomalies() {
        let head = FrameHead::new(Opcode::Text, Some(KEY), 3);
        assert!(head.anomalies().is_empty());
        assert_eq!(head.effective_mask(), KEY);
        assert_eq!(FrameHead::new(Opcode::Text, None, 3).effective_mask(), MaskingKey::ZERO);
    }

    #[test]
    fn opcode_from_str() {
        assert_eq!("text".parse::<Opcode>(), Ok(Opcode::Text));
        assert_eq!("Binary".parse::<Opcode>(), Ok(Opcode::Binary));
        assert!("close".parse::<Opcode>().is_err());
    }
}
