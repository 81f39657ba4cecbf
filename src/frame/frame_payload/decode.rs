use crate::frame::frame_payload::mask;
use crate::frame::MaskingKey;
use std::io::{self, Read};

// Yields exactly `payload_len` bytes of `transport` with the masking key applied. Bytes past the
// payload are left unread.
#[derive(Debug)]
pub struct FramePayloadReader<T: Read> {
    transport: T,
    state: FramePayloadReaderState,
}

impl<T: Read> FramePayloadReader<T> {
    pub fn new(transport: T, mask: Option<MaskingKey>, payload_len: u64) -> Self {
        FramePayloadReaderState::new(mask.unwrap_or(MaskingKey::ZERO), payload_len)
            .restore(transport)
    }
    pub fn payload_len(&self) -> u64 {
        self.state.payload_len
    }
    pub fn completion(&self) -> u64 {
        self.state.completion
    }
    pub fn finished(&self) -> bool {
        self.state.finished()
    }
}

#[derive(Debug)]
pub struct FramePayloadReaderState {
    mask: MaskingKey,
    payload_len: u64,
    completion: u64,
}

impl FramePayloadReaderState {
    pub fn new(mask: MaskingKey, payload_len: u64) -> Self {
        Self {
            mask,
            payload_len,
            completion: 0,
        }
    }
    pub fn restore<T: Read>(self, transport: T) -> FramePayloadReader<T> {
        FramePayloadReader {
            transport,
            state: self,
        }
    }
    pub fn read<T: Read>(&mut self, transport: &mut T, buf: &mut [u8]) -> io::Result<usize> {
        if self.payload_len <= self.completion || buf.is_empty() {
            return Ok(0);
        }
        let min = match usize::try_from(self.payload_len - self.completion) {
            Ok(remainder) => remainder.min(buf.len()),
            Err(_) => buf.len(),
        };
        match transport.read(&mut buf[0..min])? {
            0 => Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
            n => {
                mask(self.mask, self.completion, &mut buf[0..n]);
                self.completion += n as u64;
                Ok(n)
            }
        }
    }
    pub fn finished(&self) -> bool {
        self.payload_len == self.completion
    }
}

impl<T: Read> Read for FramePayloadReader<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Self { transport, state } = self;
        state.read(transport, buf)
    }
}
