//!
//! [`DecodedMessage`]: an ordered field-name to value mapping for one decoded,
//! non-FMT message, plus the synthetic `message_type` field.
//!

use crate::value::FieldValue;

/// One decoded message: field order matches the declaring FMT's `field_names`, with
/// the synthetic `message_type` field appended last.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    fields: Vec<(String, FieldValue)>,
}

pub const MESSAGE_TYPE_FIELD: &str = "message_type";

impl DecodedMessage {
    pub fn new(fields: Vec<(String, FieldValue)>, message_type: &str) -> Self {
        let mut fields = fields;
        fields.push((
            MESSAGE_TYPE_FIELD.to_string(),
            FieldValue::Text(message_type.to_string()),
        ));
        DecodedMessage { fields }
    }

    /// The descriptor name this message was decoded against.
    pub fn message_type(&self) -> &str {
        match self.get(MESSAGE_TYPE_FIELD) {
            Some(FieldValue::Text(s)) => s,
            _ => "",
        }
    }

    pub fn get(&self, field_name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field_name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The sort key used by the parallel coordinator's merge step. Messages lacking
    /// `TimeUS` (absent, or not an integer-representable value) sort as if it were 0.
    pub fn time_us(&self) -> i64 {
        self.get("TimeUS").and_then(FieldValue::as_i64).unwrap_or(0)
    }
}
