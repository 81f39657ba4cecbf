//! Mask and unmask single RFC 6455 websocket data frames.
//!
//! [`pipeline::mask`] wraps a payload stream into one final text or binary frame, and
//! [`pipeline::unmask`] reads one frame back and writes its payload with the mask removed.
//! The [`frame`] module holds the head codec and the masking transform both directions share.

pub mod frame;
pub mod pipeline;
