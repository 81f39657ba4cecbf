//! One frame per run: wrap a whole payload stream into a frame, or extract the payload of a frame.

mod config;

pub use config::*;

use crate::frame::{FrameDecodeError, FrameHead, FrameHeadDecoder, FramePayloadReader};
use std::io::{self, Read, Seek, SeekFrom, Write};

const COPY_BUFFER_LEN: usize = 8192;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameSummary {
    pub head: FrameHead,
    pub header_len: usize,
}

pub fn run<I: Read + Seek, O: Write>(
    mode: Mode,
    config: &MaskConfig,
    input: &mut I,
    output: &mut O,
) -> Result<FrameSummary, PipelineError> {
    log::info!("{}ing mode", mode);
    match mode {
        Mode::Mask => mask(input, output, config),
        Mode::Unmask => unmask(input, output),
    }
}

// Frames everything from the current position of `input` to its end.
pub fn mask<I: Read + Seek, O: Write>(
    input: &mut I,
    output: &mut O,
    config: &MaskConfig,
) -> Result<FrameSummary, PipelineError> {
    let payload_len = remaining_len(input)?;
    log::info!("payload size: {}", payload_len);
    let encoder = config.encoder();
    match encoder.mask {
        Some(key) => log::info!("masking key: {}", key),
        None => log::info!("producing an unmasked {} frame", config.opcode),
    }
    let head = encoder.encode_head(output, config.opcode, payload_len)?;
    let mut payload = head.payload_reader(input);
    copy_payload(&mut payload, output)?;
    output.flush()?;
    Ok(FrameSummary {
        head,
        header_len: head.len_bytes(),
    })
}

// Decodes one frame head and writes exactly its payload, unmasked. Anything after the payload is
// left in `input`.
pub fn unmask<I: Read, O: Write>(
    input: &mut I,
    output: &mut O,
) -> Result<FrameSummary, PipelineError> {
    let head = FrameHeadDecoder::default().decode(input)?;
    log::info!("payload size: {}", head.payload_len);
    log::info!("masking key: {}", head.effective_mask());
    let mut payload = head.payload_reader(input);
    copy_payload(&mut payload, output)?;
    output.flush()?;
    Ok(FrameSummary {
        head,
        header_len: head.len_bytes(),
    })
}

fn remaining_len<I: Seek>(input: &mut I) -> io::Result<u64> {
    let start = input.stream_position()?;
    let end = input.seek(SeekFrom::End(0))?;
    input.seek(SeekFrom::Start(start))?;
    Ok(end.saturating_sub(start))
}

fn copy_payload<R: Read, W: Write>(
    payload: &mut FramePayloadReader<R>,
    output: &mut W,
) -> Result<(), PipelineError> {
    let mut buffer = [0u8; COPY_BUFFER_LEN];
    loop {
        match payload.read(&mut buffer) {
            Ok(0) => return Ok(()),
            Ok(n) => output.write_all(&buffer[..n])?,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(FrameDecodeError::UnexpectedEndOfStream {
                    expected: payload.payload_len(),
                    actual: payload.completion(),
                }
                .into())
            }
            Err(err) => return Err(FrameDecodeError::Io(err).into()),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("frame error: {0}")]
    Frame(#[from] FrameDecodeError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
