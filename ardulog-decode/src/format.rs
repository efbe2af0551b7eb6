//!
//! [`FormatDescriptor`]: the typed layout of one declared message type, derived from an
//! FMT record's `ardu_format` string via the configured [`AlphabetConfig`].
//!

use crate::config::{AlphabetConfig, PrimitiveCode};

/// One field's compiled wire layout: the primitive it decodes to (`None` for an
/// unrecognized `ardu_format` character, which contributes zero bytes) plus its name.
#[derive(Debug, Clone)]
pub struct WireField {
    pub name: String,
    pub format_char: char,
    pub primitive: Option<PrimitiveCode>,
}

/// The layout of one declared ArduPilot message type, as declared by its FMT record.
#[derive(Debug, Clone)]
pub struct FormatDescriptor {
    pub type_id: u8,
    pub name: String,
    pub ardu_format: String,
    pub field_names: Vec<String>,
    pub wire_format: Vec<WireField>,
    pub payload_size: usize,
    pub message_length: u8,
}

impl FormatDescriptor {
    /// Compiles a descriptor from an FMT record's declared fields and the configured
    /// alphabet. `field_names` shorter than `ardu_format` are padded with empty names
    /// here so every wire field keeps a `name` for diagnostics; decode time is where the
    /// lengths actually get reconciled — [`crate::decoder::SegmentDecoder`] pairs values
    /// with declared names up to the shorter of the two and raises
    /// [`crate::warning::Warning::FieldCountMismatch`] on a mismatch.
    pub fn compile(
        type_id: u8,
        name: String,
        ardu_format: String,
        field_names: Vec<String>,
        message_length: u8,
        alphabet: &AlphabetConfig,
    ) -> Self {
        let wire_format: Vec<WireField> = ardu_format
            .chars()
            .enumerate()
            .map(|(i, format_char)| WireField {
                name: field_names.get(i).cloned().unwrap_or_default(),
                format_char,
                primitive: alphabet.lookup(format_char),
            })
            .collect();

        let payload_size = wire_format
            .iter()
            .map(|f| f.primitive.map(|p| p.size()).unwrap_or(0))
            .sum();

        FormatDescriptor {
            type_id,
            name,
            ardu_format,
            field_names,
            wire_format,
            payload_size,
            message_length,
        }
    }

    /// Whether every `ardu_format` character compiled to a known primitive.
    pub fn wire_format_is_valid(&self) -> bool {
        self.wire_format.iter().all(|f| f.primitive.is_some())
    }
}
