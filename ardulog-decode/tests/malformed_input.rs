//! Negative tests for malformed input handling: the frame scanner and segment
//! decoder must never panic on garbage, truncated, or empty input.

use ardulog_decode::config::AlphabetConfig;
use ardulog_decode::decoder::SegmentDecoder;
use ardulog_decode::frame::FrameScanner;
use ardulog_decode::registry::FormatRegistry;
use ardulog_decode::warning::Warnings;

#[test]
fn empty_input_decodes_to_nothing() {
    let registry = FormatRegistry::new();
    let config = Default::default();
    let decoder = SegmentDecoder::new(&[], &registry, 0, 0, None, false, &config);
    let mut warnings = Warnings::enabled();
    assert!(decoder.decode(&mut warnings).is_empty());
}

#[test]
fn truncated_header_yields_no_messages() {
    let bytes = [0xA3, 0x95];
    let registry = FormatRegistry::new();
    let config = Default::default();
    let decoder = SegmentDecoder::new(&bytes, &registry, 0, bytes.len(), None, false, &config);
    let mut warnings = Warnings::enabled();
    assert!(decoder.decode(&mut warnings).is_empty());
}

#[test]
fn random_garbage_never_panics() {
    let garbage: Vec<u8> = (0..4096).map(|i| ((i * 37 + 11) % 256) as u8).collect();
    let registry = FormatRegistry::new();
    let config = Default::default();
    let decoder = SegmentDecoder::new(&garbage, &registry, 0, garbage.len(), None, false, &config);
    let mut warnings = Warnings::enabled();
    let _ = decoder.decode(&mut warnings);
}

#[test]
fn all_sync_bytes_never_panics() {
    let bytes = vec![0xA3u8; 4096];
    let registry = FormatRegistry::new();
    let config = Default::default();
    let decoder = SegmentDecoder::new(&bytes, &registry, 0, bytes.len(), None, false, &config);
    let mut warnings = Warnings::enabled();
    let _ = decoder.decode(&mut warnings);
}

#[test]
fn malformed_fmt_name_is_rejected_without_panicking() {
    let mut buf = vec![0xA3, 0x95, 0x80, 200, 89];
    buf.extend_from_slice(b"T!T\0"); // non-alphanumeric name
    buf.extend_from_slice(&[0u8; 16]);
    buf.extend_from_slice(&[0u8; 64]);

    let scanner = FrameScanner::new(&buf);
    let alphabet = AlphabetConfig::default();
    let mut warnings = Warnings::enabled();
    assert!(scanner.parse_fmt_at(0, &alphabet, &mut warnings).is_none());
    assert_eq!(warnings.as_slice().len(), 1);
}

#[test]
fn fmt_idempotence_two_discovery_passes_yield_identical_registries() {
    let mut buf = vec![0xA3, 0x95, 0x80, 200, 79];
    buf.extend_from_slice(b"TST\0");
    buf.extend_from_slice(b"IffZ\0\0\0\0\0\0\0\0\0\0\0\0");
    let mut field_names = b"TimeUS,Val1,Val2,Note".to_vec();
    field_names.resize(64, 0);
    buf.extend_from_slice(&field_names);

    let scanner = FrameScanner::new(&buf);
    let alphabet = AlphabetConfig::default();

    let build_registry = || {
        let mut registry = FormatRegistry::new();
        let mut warnings = Warnings::enabled();
        for offset in scanner.iter_fmt_starts() {
            if let Some(descriptor) = scanner.parse_fmt_at(offset, &alphabet, &mut warnings) {
                registry.insert(descriptor);
            }
        }
        registry
    };

    let first = build_registry();
    let second = build_registry();
    assert_eq!(first.len(), second.len());
    assert_eq!(first.lookup(200).unwrap().ardu_format, second.lookup(200).unwrap().ardu_format);
    assert_eq!(first.lookup(200).unwrap().field_names, second.lookup(200).unwrap().field_names);
}
