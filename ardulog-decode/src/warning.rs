//!
//! A structured diagnostic sink the caller can opt into, kept deliberately separate
//! from the `log` facade: the core decode loop never calls into `log` itself, so a
//! caller who doesn't ask for warnings pays nothing for them (see design note
//! "Warning collection vs. logging" in the crate's expanded specification).
//!

use std::fmt;

/// One non-fatal diagnostic raised during FMT discovery, validation, or segment decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    MalformedHeader { offset: usize, reason: String },
    UnknownMessageId { offset: usize, type_id: u8 },
    Truncation { offset: usize, expected: usize },
    PayloadDecodeFailure { offset: usize, reason: String },
    FieldCountMismatch { message_type: String, offset: usize, decoded: usize, declared: usize },
    SchemaValidationFailure { type_id: u8, reason: String },
    UnrecognizedFormatChar { offset: usize, message_type: String, format_char: char },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MalformedHeader { offset, reason } => {
                write!(f, "Bad FMT at offset {offset}: {reason}")
            }
            Warning::UnknownMessageId { offset, type_id } => {
                write!(f, "Unknown or uninitialized message ID at offset {offset}: {type_id}")
            }
            Warning::Truncation { offset, expected } => {
                write!(f, "Truncated message at offset {offset}: expected {expected} bytes")
            }
            Warning::PayloadDecodeFailure { offset, reason } => {
                write!(f, "Unpack failed at offset {offset}: {reason}")
            }
            Warning::FieldCountMismatch { message_type, offset, decoded, declared } => {
                write!(
                    f,
                    "Field count mismatch for {message_type} at {offset}: {decoded} values vs {declared} fields"
                )
            }
            Warning::SchemaValidationFailure { type_id, reason } => {
                write!(f, "Schema validation failed for type {type_id}: {reason}")
            }
            Warning::UnrecognizedFormatChar { offset, message_type, format_char } => {
                write!(
                    f,
                    "Unrecognized format character '{format_char}' for {message_type} at offset {offset}: contributes zero bytes"
                )
            }
        }
    }
}

/// An append-only collection of [`Warning`]s for one parser instance's lifetime.
///
/// Collection is opt-in: constructing with [`Warnings::disabled`] makes every `push`
/// a no-op, so callers who don't want diagnostics pay no allocation cost for them.
#[derive(Debug, Clone, Default)]
pub struct Warnings {
    items: Vec<Warning>,
    enabled: bool,
}

impl Warnings {
    pub fn enabled() -> Self {
        Warnings { items: Vec::new(), enabled: true }
    }

    pub fn disabled() -> Self {
        Warnings { items: Vec::new(), enabled: false }
    }

    pub fn push(&mut self, warning: Warning) {
        if self.enabled {
            self.items.push(warning);
        }
    }

    pub fn as_slice(&self) -> &[Warning] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.items
    }

    pub fn extend(&mut self, other: Warnings) {
        if self.enabled {
            self.items.extend(other.items);
        }
    }
}
