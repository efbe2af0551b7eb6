//!
//! Configuration surface consumed (not produced) by the decoding core: the `ardu_format`
//! character alphabet, the per-character scale factors, and the set of fields subject to
//! rounding when `round_floats` is requested.
//!
//! Loading these from an external file (JSON, TOML, whatever a host application prefers)
//! is an external-collaborator concern; this module only defines the shapes and ships
//! sensible defaults matching the real ArduPilot `LogStructure` format-character alphabet,
//! so the crate decodes real `.bin` logs out of the box.
//!

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A primitive wire type that one `ardu_format` character decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveCode {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    /// Fixed-length ASCII blob of `len` bytes.
    Ascii { len: usize },
}

impl PrimitiveCode {
    /// The number of bytes this primitive occupies on the wire.
    pub fn size(&self) -> usize {
        match self {
            PrimitiveCode::I8 | PrimitiveCode::U8 => 1,
            PrimitiveCode::I16 | PrimitiveCode::U16 => 2,
            PrimitiveCode::I32 | PrimitiveCode::U32 | PrimitiveCode::F32 => 4,
            PrimitiveCode::I64 | PrimitiveCode::U64 | PrimitiveCode::F64 => 8,
            PrimitiveCode::Ascii { len } => *len,
        }
    }

    /// Whether this primitive decodes to a numeric [`crate::value::Value`] (and so is
    /// eligible for scale-factor multiplication).
    pub fn is_numeric(&self) -> bool {
        !matches!(self, PrimitiveCode::Ascii { .. })
    }
}

/// Maps `ardu_format` characters to the primitive they decode to.
///
/// Unrecognized characters map to nothing (the empty binary type): they contribute zero
/// bytes to the wire layout and a warning is raised wherever they're encountered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlphabetConfig {
    pub ardu_to_struct: HashMap<char, PrimitiveCode>,
}

impl AlphabetConfig {
    pub fn lookup(&self, format_char: char) -> Option<PrimitiveCode> {
        self.ardu_to_struct.get(&format_char).copied()
    }
}

impl Default for AlphabetConfig {
    /// The alphabet used by real ArduPilot `.bin` logs (see `LogStructure` in the
    /// ArduPilot firmware source).
    fn default() -> Self {
        use PrimitiveCode::*;
        let pairs = [
            ('b', I8),
            ('B', U8),
            ('h', I16),
            ('H', U16),
            ('c', I16),
            ('C', U16),
            ('i', I32),
            ('I', U32),
            ('e', I32),
            ('E', U32),
            ('L', I32),
            ('f', F32),
            ('d', F64),
            ('q', I64),
            ('Q', U64),
            ('M', U8),
            ('n', Ascii { len: 4 }),
            ('N', Ascii { len: 16 }),
            ('Z', Ascii { len: 64 }),
        ];
        AlphabetConfig {
            ardu_to_struct: pairs.into_iter().collect(),
        }
    }
}

/// Maps `ardu_format` characters that carry a fixed-point scale factor to their multiplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleConfig {
    pub scale_factors: HashMap<char, f64>,
}

impl ScaleConfig {
    pub fn lookup(&self, format_char: char) -> Option<f64> {
        self.scale_factors.get(&format_char).copied()
    }
}

impl Default for ScaleConfig {
    /// `c`/`C` are ArduPilot's "centi" fixed-point codes (value * 100 on the wire,
    /// typically altitude); `e`/`E`/`L` are latitude/longitude codes stored as
    /// degrees * 1e7.
    fn default() -> Self {
        let pairs = [('c', 0.01), ('C', 0.01), ('e', 1e-7), ('E', 1e-7), ('L', 1e-7)];
        ScaleConfig {
            scale_factors: pairs.into_iter().collect(),
        }
    }
}

/// Field names subjected to 3-decimal-place rounding when `round_floats` is enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundFields(pub HashSet<String>);

impl Default for RoundFields {
    fn default() -> Self {
        RoundFields(
            ["Lat", "Lng", "Alt", "Roll", "Pitch", "Yaw"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }
}

impl RoundFields {
    pub fn contains(&self, field_name: &str) -> bool {
        self.0.contains(field_name)
    }
}

/// Bundles the three configuration surfaces the decoder core consumes.
#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    pub alphabet: AlphabetConfig,
    pub scale: ScaleConfig,
    pub round_fields: RoundFields,
}
