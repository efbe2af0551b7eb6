//!
//! # ardulog-decode
//! Decoding functions and models for ArduPilot binary flight log (`.bin`) messages:
//! FMT-based self-describing message framing, a format registry, and a single-segment
//! decoder producing typed, ordered field maps.
//!
//! This crate performs no file I/O of its own — it operates on a borrowed byte slice
//! handed to it by a caller (see `ardulog-parallel` for the file-backed, multi-segment
//! orchestration built on top of it).
//!

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::correctness)]
#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod decoder;
pub mod format;
pub mod frame;
pub mod message;
pub mod registry;
pub mod result;
pub mod value;
pub mod warning;

pub use config::{AlphabetConfig, DecoderConfig, RoundFields, ScaleConfig};
pub use decoder::{NameFilter, SegmentDecoder};
pub use format::FormatDescriptor;
pub use frame::FrameScanner;
pub use message::DecodedMessage;
pub use registry::FormatRegistry;
pub use result::{Error, Result};
pub use value::{FieldValue, Value};
pub use warning::{Warning, Warnings};
