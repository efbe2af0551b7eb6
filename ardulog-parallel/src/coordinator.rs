//!
//! [`Coordinator`]: orchestrates the full decode — FMT discovery, segment planning,
//! dispatch, and the merge-sort that produces the final timestamp-ordered sequence.
//!

use crate::planner::plan_segments;
use crate::result::{Error, Result};
use ardulog_decode::config::DecoderConfig;
use ardulog_decode::decoder::{NameFilter, SegmentDecoder};
use ardulog_decode::frame::FrameScanner;
use ardulog_decode::message::DecodedMessage;
use ardulog_decode::registry::FormatRegistry;
use ardulog_decode::warning::Warnings;
use std::fs;
use std::path::Path;

/// How segments are dispatched to workers.
///
/// Rust has no global interpreter lock, so unlike the source implementation's
/// process-vs-thread split, both modes here are capable of true CPU parallelism; the
/// distinction that survives is whether workers genuinely run concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Segments are dispatched across a `rayon` work-stealing pool. Each worker gets
    /// its own clone of the registry and a reference to the same shared byte buffer.
    #[default]
    ParallelWorker,
    /// Segments are decoded sequentially on the calling thread, sharing the registry
    /// and byte buffer by reference. Exists for environments where spinning up a
    /// parallel pool is undesirable; produces identical output at lower throughput.
    CooperativeThread,
}

/// Inputs to one coordinated decode run.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    pub worker_count: usize,
    pub round_floats: bool,
    pub mode: ExecutionMode,
    pub name_filter: Option<Vec<String>>,
    pub collect_warnings: bool,
    pub config: DecoderConfig,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            worker_count: 1,
            round_floats: false,
            mode: ExecutionMode::default(),
            name_filter: None,
            collect_warnings: false,
            config: DecoderConfig::default(),
        }
    }
}

/// The merged, timestamp-ordered result of one decode run.
#[derive(Debug, Clone)]
pub struct DecodeOutcome {
    pub messages: Vec<DecodedMessage>,
    pub warnings: Vec<ardulog_decode::warning::Warning>,
}

/// Coordinator state, tracked only for diagnostics — the public API is a single call
/// to [`decode`], which drives the whole `Idle -> Discovering -> Planning ->
/// Dispatched -> Merging -> Done` sequence internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Idle,
    Discovering,
    Planning,
    Dispatched,
    Merging,
    Done,
}

/// Runs the full decode described in the module's design: FMT discovery once,
/// balanced segment planning, per-segment decode dispatch, and a stable merge sort
/// by `TimeUS`. Failure during discovery or planning, or in any single worker, is
/// fatal and aborts the run.
pub fn decode(file_path: &Path, options: &DecodeOptions) -> Result<DecodeOutcome> {
    enter_state(CoordinatorState::Idle);

    let bytes = fs::read(file_path)?;
    let file_size = bytes.len();

    enter_state(CoordinatorState::Discovering);
    let scanner = FrameScanner::new(&bytes);
    let mut registry = FormatRegistry::new();
    let mut discovery_warnings = Warnings::enabled();
    for offset in scanner.iter_fmt_starts() {
        if let Some(descriptor) = scanner.parse_fmt_at(offset, &options.config.alphabet, &mut discovery_warnings) {
            registry.insert(descriptor);
        }
    }
    registry.validate(&mut discovery_warnings);

    enter_state(CoordinatorState::Planning);
    let valid_syncs = scanner.valid_syncs(&registry);
    let segments = plan_segments(&valid_syncs, options.worker_count.max(1), file_size);

    enter_state(CoordinatorState::Dispatched);
    let name_filter = options
        .name_filter
        .as_ref()
        .map(|names| NameFilter::new(names.iter().cloned()));

    let segment_results: Vec<Result<(Vec<DecodedMessage>, Warnings)>> = match options.mode {
        ExecutionMode::ParallelWorker => dispatch_parallel(&bytes, &registry, &segments, &name_filter, options),
        ExecutionMode::CooperativeThread => dispatch_sequential(&bytes, &registry, &segments, &name_filter, options),
    };

    enter_state(CoordinatorState::Merging);
    let mut messages = Vec::new();
    let mut warnings = if options.collect_warnings { discovery_warnings } else { Warnings::disabled() };
    for (index, result) in segment_results.into_iter().enumerate() {
        let (start, end) = segments[index];
        let (segment_messages, segment_warnings) = result.map_err(|err| Error::WorkerFailure {
            start,
            end,
            message: err.to_string(),
        })?;
        messages.extend(segment_messages);
        warnings.extend(segment_warnings);
    }

    messages.sort_by_key(DecodedMessage::time_us);

    enter_state(CoordinatorState::Done);
    Ok(DecodeOutcome {
        messages,
        warnings: warnings.into_vec(),
    })
}

fn enter_state(state: CoordinatorState) {
    log::debug!("coordinator -> {state:?}");
}

type SegmentOutcome = Result<(Vec<DecodedMessage>, Warnings)>;

fn decode_one_segment(
    bytes: &[u8],
    registry: &FormatRegistry,
    segment: (usize, usize),
    name_filter: &Option<NameFilter>,
    options: &DecodeOptions,
) -> SegmentOutcome {
    let (start, end) = segment;
    let decoder = SegmentDecoder::new(
        bytes,
        registry,
        start,
        end,
        name_filter.clone(),
        options.round_floats,
        &options.config,
    );
    let mut warnings = if options.collect_warnings { Warnings::enabled() } else { Warnings::disabled() };
    let messages = decoder.decode(&mut warnings);
    Ok((messages, warnings))
}

fn dispatch_parallel(
    bytes: &[u8],
    registry: &FormatRegistry,
    segments: &[(usize, usize)],
    name_filter: &Option<NameFilter>,
    options: &DecodeOptions,
) -> Vec<SegmentOutcome> {
    use rayon::prelude::*;
    segments
        .par_iter()
        .map(|&segment| decode_one_segment(bytes, registry, segment, name_filter, options))
        .collect()
}

fn dispatch_sequential(
    bytes: &[u8],
    registry: &FormatRegistry,
    segments: &[(usize, usize)],
    name_filter: &Option<NameFilter>,
    options: &DecodeOptions,
) -> Vec<SegmentOutcome> {
    segments
        .iter()
        .map(|&segment| decode_one_segment(bytes, registry, segment, name_filter, options))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fmt_record(type_id: u8, message_length: u8, name: &str, ardu_format: &str, field_names: &str) -> Vec<u8> {
        let mut buf = Vec::with_capacity(89);
        buf.extend_from_slice(&[0xA3, 0x95, 0x80]);
        buf.push(type_id);
        buf.push(message_length);
        let mut name_bytes = [0u8; 4];
        name_bytes[..name.len()].copy_from_slice(name.as_bytes());
        buf.extend_from_slice(&name_bytes);
        let mut fmt_bytes = [0u8; 16];
        fmt_bytes[..ardu_format.len()].copy_from_slice(ardu_format.as_bytes());
        buf.extend_from_slice(&fmt_bytes);
        let mut field_bytes = [0u8; 64];
        field_bytes[..field_names.len()].copy_from_slice(field_names.as_bytes());
        buf.extend_from_slice(&field_bytes);
        buf
    }

    fn message_record(type_id: u8, time_us: u32, val1: f32, val2: f32, note: &str) -> Vec<u8> {
        let mut buf = vec![0xA3, 0x95, type_id];
        buf.extend_from_slice(&time_us.to_le_bytes());
        buf.extend_from_slice(&val1.to_le_bytes());
        buf.extend_from_slice(&val2.to_le_bytes());
        let mut note_bytes = [0u8; 64];
        note_bytes[..note.len()].copy_from_slice(note.as_bytes());
        buf.extend_from_slice(&note_bytes);
        buf
    }

    fn write_sample_log(path: &Path, message_count: usize) {
        let mut bytes = fmt_record(200, 79, "TST", "IffZ", "TimeUS,Val1,Val2,Note");
        for i in 0..message_count {
            bytes.extend(message_record(200, 1000 + i as u32 * 10, 1.0, 2.0, "x"));
        }
        let mut file = fs::File::create(path).unwrap();
        file.write_all(&bytes).unwrap();
    }

    #[test]
    fn decode_sorts_and_excludes_fmt() {
        let dir = std::env::temp_dir().join("ardulog-coordinator-test-1");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.bin");
        write_sample_log(&path, 5);

        let options = DecodeOptions { collect_warnings: true, ..Default::default() };
        let outcome = decode(&path, &options).unwrap();
        assert_eq!(outcome.messages.len(), 5);
        assert!(outcome.messages.iter().all(|m| m.message_type() != "FMT"));
        let times: Vec<i64> = outcome.messages.iter().map(|m| m.time_us()).collect();
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn parallel_and_sequential_modes_agree() {
        let dir = std::env::temp_dir().join("ardulog-coordinator-test-2");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.bin");
        write_sample_log(&path, 500);

        let mut parallel_opts = DecodeOptions { worker_count: 8, mode: ExecutionMode::ParallelWorker, ..Default::default() };
        let mut sequential_opts = DecodeOptions { worker_count: 8, mode: ExecutionMode::CooperativeThread, ..Default::default() };
        parallel_opts.worker_count = 8;
        sequential_opts.worker_count = 8;

        let parallel_result = decode(&path, &parallel_opts).unwrap();
        let sequential_result = decode(&path, &sequential_opts).unwrap();

        assert_eq!(parallel_result.messages.len(), sequential_result.messages.len());
        assert_eq!(
            parallel_result.messages.iter().map(DecodedMessage::time_us).collect::<Vec<_>>(),
            sequential_result.messages.iter().map(DecodedMessage::time_us).collect::<Vec<_>>(),
        );

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_is_io_failure() {
        let options = DecodeOptions::default();
        let result = decode(Path::new("/nonexistent/path/to/log.bin"), &options);
        assert!(matches!(result, Err(Error::IOFailure(_))));
    }

    #[test]
    fn segment_planner_edge_case_from_design_notes() {
        assert_eq!(plan_segments(&[], 8, 1234), vec![(0, 1234)]);
        assert_eq!(plan_segments(&[0, 100], 8, 1000).len(), 2);
    }
}
