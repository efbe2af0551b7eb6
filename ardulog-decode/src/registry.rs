//!
//! [`FormatRegistry`]: maps `type_id -> FormatDescriptor`, populated once during FMT
//! discovery and read-only thereafter.
//!

use crate::format::FormatDescriptor;
use crate::warning::{Warning, Warnings};
use std::collections::HashMap;

/// The set of message-type layouts discovered in one log's FMT pass.
///
/// Immutable after discovery: every worker in parallel-worker mode gets its own clone
/// (see the parallel coordinator), and cooperative-thread mode shares one instance by
/// reference. Either way no mutation happens once `validate()` has run.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    descriptors: HashMap<u8, FormatDescriptor>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor. If `type_id` was already registered, the new descriptor
    /// silently overwrites it — the last FMT record for a given id wins.
    pub fn insert(&mut self, descriptor: FormatDescriptor) {
        self.descriptors.insert(descriptor.type_id, descriptor);
    }

    /// Constant-time retrieval; `None` if `type_id` has no registered descriptor.
    pub fn lookup(&self, type_id: u8) -> Option<&FormatDescriptor> {
        self.descriptors.get(&type_id)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormatDescriptor> {
        self.descriptors.values()
    }

    /// Scans every registered descriptor and emits a warning for each one whose wire
    /// layout fails to compile under the configured alphabet, whose computed payload
    /// size disagrees with the stored `payload_size`, or whose `payload_size` exceeds
    /// `message_length - 3`. Non-destructive: descriptors are never evicted here.
    pub fn validate(&self, warnings: &mut Warnings) {
        for descriptor in self.descriptors.values() {
            if !descriptor.wire_format_is_valid() {
                log::debug!(
                    "FMT {} ({}) has unrecognized ardu_format characters",
                    descriptor.type_id,
                    descriptor.name
                );
                warnings.push(Warning::SchemaValidationFailure {
                    type_id: descriptor.type_id,
                    reason: format!(
                        "ardu_format '{}' contains characters outside the configured alphabet",
                        descriptor.ardu_format
                    ),
                });
            }

            let expected_payload = descriptor.message_length as i64 - 3;
            if descriptor.payload_size as i64 != expected_payload {
                log::debug!(
                    "FMT {} ({}) payload/message_length mismatch: payload={} message_length={}",
                    descriptor.type_id,
                    descriptor.name,
                    descriptor.payload_size,
                    descriptor.message_length
                );
                warnings.push(Warning::SchemaValidationFailure {
                    type_id: descriptor.type_id,
                    reason: format!(
                        "payload_size {} + 3 != message_length {}",
                        descriptor.payload_size, descriptor.message_length
                    ),
                });
            } else if descriptor.payload_size as i64 > expected_payload {
                warnings.push(Warning::SchemaValidationFailure {
                    type_id: descriptor.type_id,
                    reason: format!(
                        "payload_size {} exceeds message_length - 3 ({})",
                        descriptor.payload_size, expected_payload
                    ),
                });
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::AlphabetConfig;

    fn descriptor(type_id: u8, ardu_format: &str, message_length: u8) -> FormatDescriptor {
        FormatDescriptor::compile(
            type_id,
            "TST".to_string(),
            ardu_format.to_string(),
            vec!["A".to_string(); ardu_format.len()],
            message_length,
            &AlphabetConfig::default(),
        )
    }

    #[test]
    fn insert_overwrites_by_type_id() {
        let mut registry = FormatRegistry::new();
        registry.insert(descriptor(1, "b", 4));
        registry.insert(descriptor(1, "bb", 5));
        assert_eq!(registry.lookup(1).unwrap().ardu_format, "bb");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_absent_returns_none() {
        let registry = FormatRegistry::new();
        assert!(registry.lookup(7).is_none());
    }

    #[test]
    fn validate_flags_size_mismatch() {
        let mut registry = FormatRegistry::new();
        registry.insert(descriptor(1, "I", 10)); // I = 4 bytes, message_length should be 7
        let mut warnings = Warnings::enabled();
        registry.validate(&mut warnings);
        assert_eq!(warnings.as_slice().len(), 1);
        assert!(matches!(
            warnings.as_slice()[0],
            Warning::SchemaValidationFailure { type_id: 1, .. }
        ));
    }

    #[test]
    fn validate_accepts_consistent_descriptor() {
        let mut registry = FormatRegistry::new();
        registry.insert(descriptor(1, "I", 7)); // 4 + 3 == 7
        let mut warnings = Warnings::enabled();
        registry.validate(&mut warnings);
        assert!(warnings.as_slice().is_empty());
    }

    #[test]
    fn validate_is_non_destructive() {
        let mut registry = FormatRegistry::new();
        registry.insert(descriptor(1, "I", 10));
        let mut warnings = Warnings::enabled();
        registry.validate(&mut warnings);
        assert!(registry.lookup(1).is_some());
    }
}
