use crate::frame::decode::FrameDecodeError;
use crate::frame::{FrameHead, FrameHeadParseError};
use std::io::{self, Read};

#[derive(Copy, Clone, Debug, Default)]
pub struct FrameHeadDecoder {}

impl FrameHeadDecoder {
    // Reads exactly the bytes of one frame head from `transport`. Shape anomalies are logged and
    // left in the returned head; only a short read is an error.
    pub fn decode<T: Read>(self, transport: &mut T) -> Result<FrameHead, FrameDecodeError> {
        let mut state = FrameHeadDecodeState::new();
        let head = state.read(transport)?;
        log::debug!("frame head bytes: {:02x?}", state.bytes());
        for anomaly in head.anomalies() {
            log::warn!("{}", anomaly);
        }
        Ok(head)
    }
}

#[derive(Debug)]
pub struct FrameHeadDecodeState {
    buffer: [u8; 14],
    buffer_len: usize,
}

impl FrameHeadDecodeState {
    pub fn new() -> Self {
        Self {
            buffer: [0u8; 14],
            buffer_len: 0,
        }
    }
    pub fn bytes(&self) -> &[u8] {
        &self.buffer[0..self.buffer_len]
    }
    pub fn read<T: Read>(&mut self, transport: &mut T) -> Result<FrameHead, FrameDecodeError> {
        loop {
            let min = match FrameHead::parse(self.bytes()) {
                Ok(head) => return Ok(head),
                Err(FrameHeadParseError::Incomplete(min)) => min,
            };
            let buffer_len = self.buffer_len;
            match transport.read(&mut self.buffer[buffer_len..min]) {
                Ok(0) => {
                    return Err(FrameDecodeError::TruncatedHeader {
                        needed: min,
                        available: buffer_len,
                    })
                }
                Ok(n) => self.buffer_len += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }
}

impl Default for FrameHeadDecodeState {
    fn default() -> Self {
        Self::new()
    }
}
