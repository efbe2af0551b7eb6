//!
//! [`FrameScanner`]: locates message starts in a byte slice via the two-byte
//! synchronization marker `A3 95`, and decodes FMT records into [`FormatDescriptor`]s.
//!

use crate::config::AlphabetConfig;
use crate::format::FormatDescriptor;
use crate::registry::FormatRegistry;
use crate::warning::{Warning, Warnings};
use zerocopy::{FromBytes, Immutable, KnownLayout};

pub const SYNC_MARKER: [u8; 2] = [0xA3, 0x95];
pub const FMT_TYPE_ID: u8 = 0x80;
pub const FMT_MESSAGE_LENGTH: usize = 89;

/// The fixed 89-byte on-wire layout of one FMT record (see §4.2 table).
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout)]
struct RawFmtRecord {
    sync: [u8; 2],
    fmt_type_id: u8,
    type_id: u8,
    message_length: u8,
    name: [u8; 4],
    ardu_format: [u8; 16],
    field_names: [u8; 64],
}

/// Locates message starts in a byte slice and decodes FMT records.
///
/// Holds no state of its own beyond the borrowed slice; every method is a pure
/// function of `bytes` and its arguments, so scanners are trivially `Copy`-cheap to
/// hand to each worker in parallel-worker mode.
#[derive(Debug, Clone, Copy)]
pub struct FrameScanner<'a> {
    bytes: &'a [u8],
}

impl<'a> FrameScanner<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        FrameScanner { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lazily yields every offset at which `A3 95 80` occurs, advancing by
    /// [`FMT_MESSAGE_LENGTH`] after each hit so overlapping FMT regions are never
    /// revisited.
    pub fn iter_fmt_starts(&self) -> impl Iterator<Item = usize> + '_ {
        FmtStartIter {
            bytes: self.bytes,
            position: 0,
        }
    }

    /// Decodes one candidate FMT record at `offset`. Returns `None` (plus a warning)
    /// if the name fails `[A-Za-z0-9]+`, or if the record doesn't fit in the slice.
    /// Unrecognized `ardu_format` characters do not reject the record — they compile
    /// to `None` primitives and are flagged by [`crate::registry::FormatRegistry::validate`].
    pub fn parse_fmt_at(
        &self,
        offset: usize,
        alphabet: &AlphabetConfig,
        warnings: &mut Warnings,
    ) -> Option<FormatDescriptor> {
        let end = offset.checked_add(FMT_MESSAGE_LENGTH)?;
        let slice = self.bytes.get(offset..end)?;
        let raw = RawFmtRecord::ref_from_bytes(slice).ok()?;

        let name = ascii_trim_nul(&raw.name);
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            warnings.push(Warning::MalformedHeader {
                offset,
                reason: format!("name {name:?} does not match [A-Za-z0-9]+"),
            });
            return None;
        }

        let ardu_format = match decode_ascii_lossy(&raw.ardu_format) {
            Some(s) => s,
            None => {
                warnings.push(Warning::MalformedHeader {
                    offset,
                    reason: "ardu_format is not valid ASCII".to_string(),
                });
                return None;
            }
        };

        let field_names = parse_field_names(&raw.field_names);

        Some(FormatDescriptor::compile(
            raw.type_id,
            name,
            ardu_format,
            field_names,
            raw.message_length,
            alphabet,
        ))
    }

    /// Returns the next sync offset in `[start, limit)` with at least 3 bytes of
    /// header remaining before `limit`, or `None` if exhausted.
    pub fn find_next_message(&self, start: usize, limit: usize) -> Option<usize> {
        let limit = limit.min(self.bytes.len());
        if start >= limit {
            return None;
        }
        let mut position = start;
        while position + 2 <= limit {
            if self.bytes[position..position + 2] == SYNC_MARKER {
                if position + 3 <= limit {
                    return Some(position);
                }
                return None;
            }
            position += 1;
        }
        None
    }

    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    pub fn slice(&self, start: usize, end: usize) -> Option<&'a [u8]> {
        self.bytes.get(start..end)
    }

    /// Linearly scans the whole slice for sync markers, keeping an offset only when
    /// `offset+2` names a known message type (FMT or a registered descriptor) and the
    /// declared `message_length` fully fits before the end of the slice.
    pub fn valid_syncs(&self, registry: &FormatRegistry) -> Vec<usize> {
        let mut syncs = Vec::new();
        let mut position = 0usize;
        while position + 3 <= self.bytes.len() {
            if self.bytes[position..position + 2] == SYNC_MARKER {
                let type_id = self.bytes[position + 2];
                let message_length = if type_id == FMT_TYPE_ID {
                    Some(FMT_MESSAGE_LENGTH)
                } else {
                    registry.lookup(type_id).map(|d| d.message_length as usize)
                };
                if let Some(message_length) = message_length {
                    if position + message_length <= self.bytes.len() {
                        syncs.push(position);
                    }
                }
            }
            position += 1;
        }
        syncs
    }
}

struct FmtStartIter<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl Iterator for FmtStartIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.position + 3 <= self.bytes.len() {
            if self.bytes[self.position..self.position + 2] == SYNC_MARKER
                && self.bytes[self.position + 2] == FMT_TYPE_ID
            {
                let hit = self.position;
                self.position += FMT_MESSAGE_LENGTH;
                return Some(hit);
            }
            self.position += 1;
        }
        None
    }
}

/// Strips trailing NULs from a fixed-size ASCII blob; invalid bytes are dropped.
fn ascii_trim_nul(bytes: &[u8]) -> String {
    let trimmed = bytes.split(|&b| b == 0).next().unwrap_or(&[]);
    trimmed.iter().filter(|b| b.is_ascii()).map(|&b| b as char).collect()
}

fn decode_ascii_lossy(bytes: &[u8]) -> Option<String> {
    if bytes.iter().any(|&b| b != 0 && !b.is_ascii()) {
        return None;
    }
    Some(ascii_trim_nul(bytes))
}

/// Field names sit before the first run of 2+ consecutive NULs, comma-separated,
/// stripped of spaces, with empty entries discarded.
fn parse_field_names(bytes: &[u8]) -> Vec<String> {
    let mut cut = bytes.len();
    let mut run = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b == 0 {
            run += 1;
            if run >= 2 {
                cut = i - 1;
                break;
            }
        } else {
            run = 0;
        }
    }
    let text: String = bytes[..cut]
        .iter()
        .take_while(|&&b| b != 0)
        .filter(|b| b.is_ascii())
        .map(|&b| b as char)
        .collect();

    text.split(',')
        .map(|s| s.replace(' ', ""))
        .filter(|s| !s.is_empty())
        .collect()
}
