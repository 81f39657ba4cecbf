use crate::frame::{FrameEncoder, MaskingKey, Opcode};

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Mask,
    Unmask,
}

// Parameters of the masking direction. Unmasking takes everything it needs from the frame head.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MaskConfig {
    pub key: MaskingKey,
    pub opcode: Opcode,
    // Produce a frame with the mask bit clear, no key bytes and the payload copied verbatim.
    pub masked: bool,
}

impl MaskConfig {
    pub fn binary() -> Self {
        Self::default()
    }
    pub fn text() -> Self {
        Self {
            opcode: Opcode::Text,
            ..Self::default()
        }
    }
    pub fn with_key(self, key: MaskingKey) -> Self {
        Self { key, ..self }
    }
    pub fn unmasked(self) -> Self {
        Self {
            masked: false,
            ..self
        }
    }
    pub fn encoder(&self) -> FrameEncoder {
        match self.masked {
            true => FrameEncoder::with_key(self.key),
            false => FrameEncoder::server(),
        }
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            key: MaskingKey::DEFAULT,
            opcode: Opcode::Binary,
            masked: true,
        }
    }
}
