//!
//! [`SegmentDecoder`]: decodes every non-FMT message whose start lies within one
//! byte range, against an already-populated [`FormatRegistry`].
//!

use crate::config::{DecoderConfig, PrimitiveCode};
use crate::format::FormatDescriptor;
use crate::frame::{FrameScanner, FMT_MESSAGE_LENGTH, FMT_TYPE_ID};
use crate::message::DecodedMessage;
use crate::registry::FormatRegistry;
use crate::value::{FieldValue, Value};
use crate::warning::{Warning, Warnings};
use std::collections::HashSet;

/// Which message-type names to keep. Absent means "keep everything".
#[derive(Debug, Clone)]
pub struct NameFilter(HashSet<String>);

impl NameFilter {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        NameFilter(names.into_iter().collect())
    }

    fn allows(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

/// Decodes every non-FMT message starting in `[segment_start, segment_end)` against
/// `registry`. Mirrors the per-message algorithm in exact edge-case order: unknown ids
/// resync by one byte, known-but-truncated frames terminate the segment, malformed
/// payloads resync by the declared `message_length`.
pub struct SegmentDecoder<'a> {
    scanner: FrameScanner<'a>,
    registry: &'a FormatRegistry,
    segment_start: usize,
    segment_end: usize,
    name_filter: Option<NameFilter>,
    round_floats: bool,
    config: &'a DecoderConfig,
}

impl<'a> SegmentDecoder<'a> {
    pub fn new(
        bytes: &'a [u8],
        registry: &'a FormatRegistry,
        segment_start: usize,
        segment_end: usize,
        name_filter: Option<NameFilter>,
        round_floats: bool,
        config: &'a DecoderConfig,
    ) -> Self {
        SegmentDecoder {
            scanner: FrameScanner::new(bytes),
            registry,
            segment_start,
            segment_end,
            name_filter,
            round_floats,
            config,
        }
    }

    /// Runs the full algorithm over the segment, collecting warnings into `warnings`.
    pub fn decode(&self, warnings: &mut Warnings) -> Vec<DecodedMessage> {
        let mut out = Vec::new();
        let mut position = self.segment_start;

        while let Some(offset) = self.scanner.find_next_message(position, self.segment_end) {
            if self.segment_end - offset < 4 {
                break;
            }

            let Some(type_id) = self.scanner.byte_at(offset + 2) else {
                break;
            };

            if type_id == FMT_TYPE_ID {
                position = offset + FMT_MESSAGE_LENGTH;
                continue;
            }

            let descriptor = match self.registry.lookup(type_id) {
                Some(d) => d,
                None => {
                    warnings.push(Warning::UnknownMessageId { offset, type_id });
                    position = offset + 1;
                    continue;
                }
            };

            if let Some(filter) = &self.name_filter {
                if !filter.allows(&descriptor.name) {
                    position = offset + descriptor.message_length as usize;
                    continue;
                }
            }

            let payload_start = offset + 3;
            let payload_end = payload_start + descriptor.payload_size;
            if payload_end > self.segment_end {
                warnings.push(Warning::Truncation {
                    offset,
                    expected: descriptor.payload_size,
                });
                break;
            }

            let Some(payload) = self.scanner.slice(payload_start, payload_end) else {
                warnings.push(Warning::Truncation {
                    offset,
                    expected: descriptor.payload_size,
                });
                break;
            };

            match self.decode_payload(descriptor, payload, offset, warnings) {
                Some(message) => out.push(message),
                None => {
                    position = offset + descriptor.message_length as usize;
                    continue;
                }
            }

            position = offset + descriptor.message_length as usize;
        }

        out
    }

    fn decode_payload(
        &self,
        descriptor: &FormatDescriptor,
        payload: &[u8],
        offset: usize,
        warnings: &mut Warnings,
    ) -> Option<DecodedMessage> {
        let mut values = Vec::with_capacity(descriptor.field_names.len());
        let mut cursor = 0usize;
        let keep = descriptor.wire_format.len().min(descriptor.field_names.len());

        for (index, field) in descriptor.wire_format.iter().enumerate() {
            let Some(primitive) = field.primitive else {
                warnings.push(Warning::UnrecognizedFormatChar {
                    offset,
                    message_type: descriptor.name.clone(),
                    format_char: field.format_char,
                });
                continue;
            };

            let size = primitive.size();
            let Some(bytes) = payload.get(cursor..cursor + size) else {
                warnings.push(Warning::PayloadDecodeFailure {
                    offset,
                    reason: format!("field '{}' needs {size} bytes but payload is exhausted", field.name),
                });
                return None;
            };
            cursor += size;

            if index >= keep {
                continue;
            }

            let field_value = decode_primitive(primitive, bytes);
            let field_value = match field_value {
                FieldValue::Scalar(value) if primitive.is_numeric() => {
                    match self.config.scale.lookup(field.format_char) {
                        Some(factor) => FieldValue::Scalar(value.scaled(factor)),
                        None => FieldValue::Scalar(value),
                    }
                }
                other => other,
            };
            values.push((descriptor.field_names[index].clone(), field_value));
        }

        if descriptor.wire_format.len() != descriptor.field_names.len() {
            warnings.push(Warning::FieldCountMismatch {
                message_type: descriptor.name.clone(),
                offset,
                decoded: descriptor.wire_format.len(),
                declared: descriptor.field_names.len(),
            });
        }

        if self.round_floats {
            for (name, value) in values.iter_mut() {
                if self.config.round_fields.contains(name) {
                    if let FieldValue::Scalar(v) = value {
                        *v = v.round3();
                    }
                }
            }
        }

        Some(DecodedMessage::new(values, &descriptor.name))
    }
}

/// Decodes one primitive's raw little-endian bytes into a [`FieldValue`]. ASCII blobs
/// are decoded ignoring non-ASCII bytes, with trailing NULs stripped; any conceptual
/// decode failure is swallowed by falling back to the raw (possibly lossy) text.
fn decode_primitive(primitive: PrimitiveCode, bytes: &[u8]) -> FieldValue {
    match primitive {
        PrimitiveCode::I8 => FieldValue::Scalar(Value::I8(bytes[0] as i8)),
        PrimitiveCode::U8 => FieldValue::Scalar(Value::U8(bytes[0])),
        PrimitiveCode::I16 => FieldValue::Scalar(Value::I16(i16::from_le_bytes(bytes.try_into().unwrap_or_default()))),
        PrimitiveCode::U16 => FieldValue::Scalar(Value::U16(u16::from_le_bytes(bytes.try_into().unwrap_or_default()))),
        PrimitiveCode::I32 => FieldValue::Scalar(Value::I32(i32::from_le_bytes(bytes.try_into().unwrap_or_default()))),
        PrimitiveCode::U32 => FieldValue::Scalar(Value::U32(u32::from_le_bytes(bytes.try_into().unwrap_or_default()))),
        PrimitiveCode::I64 => FieldValue::Scalar(Value::I64(i64::from_le_bytes(bytes.try_into().unwrap_or_default()))),
        PrimitiveCode::U64 => FieldValue::Scalar(Value::U64(u64::from_le_bytes(bytes.try_into().unwrap_or_default()))),
        PrimitiveCode::F32 => FieldValue::Scalar(Value::F32(f32::from_le_bytes(bytes.try_into().unwrap_or_default()))),
        PrimitiveCode::F64 => FieldValue::Scalar(Value::F64(f64::from_le_bytes(bytes.try_into().unwrap_or_default()))),
        PrimitiveCode::Ascii { .. } => {
            let text: String = bytes
                .split(|&b| b == 0)
                .next()
                .unwrap_or(&[])
                .iter()
                .filter(|b| b.is_ascii())
                .map(|&b| b as char)
                .collect();
            FieldValue::Text(text)
        }
    }
}
