//! Partitioning of an ordered line sequence into N contiguous parts

use crate::error::{PipelineError, Result};
use std::ops::Range;

/// Contiguous index ranges for an even split of `total` lines into `parts`.
///
/// The first `total % parts` ranges hold one extra line. Ranges are disjoint,
/// in order, and the last one ends at `total`. When `total < parts` the
/// trailing ranges are empty.
pub fn plan_parts(total: u64, parts: usize) -> Result<Vec<Range<u64>>> {
    if parts == 0 {
        return Err(PipelineError::invalid("number of parts must be at least 1"));
    }

    let n = parts as u64;
    let base = total / n;
    let rem = total % n;

    let mut ranges: Vec<Range<u64>> = (0..n)
        .map(|i| {
            let start = i * base + i.min(rem);
            let len = base + u64::from(i < rem);
            start..start + len
        })
        .collect();

    if let Some(last) = ranges.last_mut() {
        last.end = total;
    }

    Ok(ranges)
}

/// Assigns a stream of lines to parts by quota.
///
/// Lines fill the current part until it reaches its quota, then move on.
/// The last part takes everything left over, so no line is dropped when the
/// quotas came from an estimate.
#[derive(Debug, Clone)]
pub struct StreamingPartitioner {
    quotas: Vec<u64>,
    current: usize,
    filled: u64,
}

impl StreamingPartitioner {
    pub fn new(quotas: Vec<u64>) -> Result<Self> {
        if quotas.is_empty() {
            return Err(PipelineError::invalid("number of parts must be at least 1"));
        }
        Ok(Self {
            quotas,
            current: 0,
            filled: 0,
        })
    }

    /// Quotas from an even split of an expected line count.
    pub fn even(expected_total: u64, parts: usize) -> Result<Self> {
        let quotas = plan_parts(expected_total, parts)?
            .into_iter()
            .map(|r| r.end - r.start)
            .collect();
        Self::new(quotas)
    }

    /// Part index for the next line.
    pub fn assign(&mut self) -> usize {
        let last = self.quotas.len() - 1;
        while self.current < last && self.filled >= self.quotas[self.current] {
            self.current += 1;
            self.filled = 0;
        }
        self.filled += 1;
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(ranges: &[Range<u64>]) -> Vec<u64> {
        ranges.iter().map(|r| r.end - r.start).collect()
    }

    #[test]
    fn test_even_split_sizes() {
        let ranges = plan_parts(10, 3).unwrap();
        assert_eq!(ranges, vec![0..4, 4..7, 7..10]);

        let ranges = plan_parts(9, 3).unwrap();
        assert_eq!(sizes(&ranges), vec![3, 3, 3]);
    }

    #[test]
    fn test_fewer_lines_than_parts() {
        let ranges = plan_parts(2, 5).unwrap();
        assert_eq!(sizes(&ranges), vec![1, 1, 0, 0, 0]);
        assert_eq!(ranges.last().unwrap().end, 2);
    }

    #[test]
    fn test_ranges_cover_everything_once() {
        for total in 0..40u64 {
            for parts in 1..9usize {
                let ranges = plan_parts(total, parts).unwrap();
                assert_eq!(ranges.len(), parts);
                assert_eq!(ranges[0].start, 0);
                assert_eq!(ranges.last().unwrap().end, total);
                for pair in ranges.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start);
                }
                let empty = ranges.iter().filter(|r| r.is_empty()).count();
                if total >= parts as u64 {
                    assert_eq!(empty, 0);
                }
            }
        }
    }

    #[test]
    fn test_zero_parts_rejected() {
        assert!(plan_parts(10, 0).unwrap_err().is_parameter_error());
        assert!(StreamingPartitioner::new(Vec::new()).is_err());
    }

    #[test]
    fn test_streaming_matches_even_split() {
        let mut partitioner = StreamingPartitioner::even(10, 3).unwrap();
        let assigned: Vec<usize> = (0..10).map(|_| partitioner.assign()).collect();
        assert_eq!(assigned, vec![0, 0, 0, 0, 1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_streaming_last_part_absorbs_overflow() {
        // Estimated 4 lines, 7 arrive
        let mut partitioner = StreamingPartitioner::even(4, 2).unwrap();
        let assigned: Vec<usize> = (0..7).map(|_| partitioner.assign()).collect();
        assert_eq!(assigned, vec![0, 0, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_streaming_skips_empty_quotas() {
        let mut partitioner = StreamingPartitioner::new(vec![1, 0, 2]).unwrap();
        let assigned: Vec<usize> = (0..3).map(|_| partitioner.assign()).collect();
        assert_eq!(assigned, vec![0, 2, 2]);
    }
}
