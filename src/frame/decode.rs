#[derive(thiserror::Error, Debug)]
pub enum FrameDecodeError {
    #[error("truncated frame head, need {needed} bytes but the stream ended after {available}")]
    TruncatedHeader { needed: usize, available: usize },
    #[error("unexpected end of stream, payload declared {expected} bytes but only {actual} were read")]
    UnexpectedEndOfStream { expected: u64, actual: u64 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
