use crate::frame::{mask, FrameHead, MaskingKey, Opcode};
use std::io::{self, Write};

#[derive(Copy, Clone, Debug)]
pub struct FrameEncoder {
    pub mask: Option<MaskingKey>,
}

impl FrameEncoder {
    pub fn server() -> Self {
        Self { mask: None }
    }
    pub fn with_key(key: MaskingKey) -> Self {
        Self { mask: Some(key) }
    }
    pub fn head(&self, opcode: Opcode, payload_len: u64) -> FrameHead {
        FrameHead::new(opcode, self.mask, payload_len)
    }
    // Writes only the frame head. The caller is responsible for following it with `payload_len`
    // bytes masked with `head.effective_mask()`.
    pub fn encode_head<T: Write>(
        &self,
        transport: &mut T,
        opcode: Opcode,
        payload_len: u64,
    ) -> io::Result<FrameHead> {
        let head = self.head(opcode, payload_len);
        let mut buffer = [0u8; 14];
        let len = head.encode(&mut buffer);
        log::debug!("frame head bytes: {:02x?}", &buffer[..len]);
        transport.write_all(&buffer[..len])?;
        Ok(head)
    }
    // Masks `payload` in place and writes the complete frame.
    pub fn encode<T: Write>(
        &self,
        transport: &mut T,
        opcode: Opcode,
        payload: &mut [u8],
    ) -> io::Result<FrameHead> {
        let head = self.encode_head(transport, opcode, payload.len() as u64)?;
        mask(head.effective_mask(), 0, payload);
        transport.write_all(payload)?;
        Ok(head)
    }
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::with_key(MaskingKey::DEFAULT)
    }
}
