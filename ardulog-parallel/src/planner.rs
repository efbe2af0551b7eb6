//!
//! Segment planner: partitions valid sync offsets into balanced, non-overlapping
//! byte ranges so every worker's first sync attempt lands on a genuine message start.
//!

/// A half-open byte range `[start, end)` assigned to one worker.
pub type Segment = (usize, usize);

/// Plans `k = max(1, min(num_parts, valid_syncs.len()))` contiguous, non-overlapping
/// ranges covering `[0, file_size)`, each starting at a valid sync offset (except the
/// empty-input fallback). Sync counts per range differ by at most one: the first
/// `valid_syncs.len() % k` ranges take one extra sync.
///
/// `valid_syncs` must be sorted ascending; this is the contract of the caller (the
/// frame scanner's linear sweep naturally produces it in order).
pub fn plan_segments(valid_syncs: &[usize], num_parts: usize, file_size: usize) -> Vec<Segment> {
    if valid_syncs.is_empty() {
        return vec![(0, file_size)];
    }

    let n = valid_syncs.len();
    let k = num_parts.clamp(1, n);
    let base = n / k;
    let remainder = n % k;

    let mut ranges = Vec::with_capacity(k);
    let mut index = 0usize;
    for i in 0..k {
        let count = base + usize::from(i < remainder);
        let start = valid_syncs[index];
        index += count;
        let end = if i == k - 1 { file_size } else { valid_syncs[index] };
        ranges.push((start, end));
    }
    ranges
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_valid_syncs_falls_back_to_whole_file() {
        assert_eq!(plan_segments(&[], 8, 1234), vec![(0, 1234)]);
    }

    #[test]
    fn num_parts_clamped_to_valid_sync_count() {
        let ranges = plan_segments(&[0, 100], 8, 1000);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges, vec![(0, 100), (100, 1000)]);
    }

    #[test]
    fn ranges_are_contiguous_and_cover_file_size() {
        let valid_syncs: Vec<usize> = (0..17).map(|i| i * 50).collect();
        let ranges = plan_segments(&valid_syncs, 4, 900);
        assert_eq!(ranges.len(), 4);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        assert_eq!(ranges.last().unwrap().1, 900);
        assert_eq!(ranges.first().unwrap().0, 0);
    }

    #[test]
    fn balance_differs_by_at_most_one() {
        let valid_syncs: Vec<usize> = (0..17).map(|i| i * 50).collect();
        let ranges = plan_segments(&valid_syncs, 4, 900);
        let counts: Vec<usize> = ranges
            .iter()
            .map(|&(start, end)| valid_syncs.iter().filter(|&&s| s >= start && s < end).count())
            .collect();
        let max = *counts.iter().max().unwrap();
        let min = *counts.iter().min().unwrap();
        assert!(max - min <= 1);
        assert_eq!(counts.iter().sum::<usize>(), valid_syncs.len());
    }

    #[test]
    fn single_worker_yields_one_range() {
        let valid_syncs = vec![0, 50, 100];
        let ranges = plan_segments(&valid_syncs, 1, 150);
        assert_eq!(ranges, vec![(0, 150)]);
    }
}
